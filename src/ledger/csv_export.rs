// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{LedgerError, LedgerSource};
use crate::models::RawRecord;
use csv::{ReaderBuilder, Trim};
use std::path::PathBuf;

/// Reads a ledger export with the header
/// `date,institution,title,amount,expense_type,payment_month,payee,description,installment`.
/// Amounts use the remote service's sign: positive is money going out.
pub struct CsvSource {
    path: PathBuf,
    key: String,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = format!("csv:{}", path.display());
        Self { path, key }
    }
}

impl LedgerSource for CsvSource {
    fn name(&self) -> &str {
        &self.key
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, LedgerError> {
        let csv_err = |source| LedgerError::Csv {
            path: self.path.display().to_string(),
            source,
        };
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(&self.path)
            .map_err(csv_err)?;
        rdr.deserialize::<RawRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(csv_err)
    }
}
