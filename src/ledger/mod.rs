// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Where raw records come from, and the cache that sits in front of them.

pub mod cache;
pub mod csv_export;
pub mod notion;

use crate::models::RawRecord;
use thiserror::Error;

pub use cache::{CachedLedger, MemoryCache, SnapshotCache, SqliteCache, DEFAULT_TTL_SECS};
pub use csv_export::CsvSource;
pub use notion::{record_from_page, NotionSource};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("ledger service returned {status}: {body}")]
    Remote { status: u16, body: String },
    #[error("ledger request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("could not read CSV ledger {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("snapshot cache failure: {0}")]
    Cache(#[from] rusqlite::Error),
    #[error("snapshot payload is not valid JSON: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("setting '{0}' is required to reach the ledger service")]
    MissingSetting(&'static str),
}

/// Anything that can hand over the full ledger in one go.
pub trait LedgerSource {
    /// Stable identifier, used as the cache key.
    fn name(&self) -> &str;

    fn fetch(&self) -> Result<Vec<RawRecord>, LedgerError>;
}
