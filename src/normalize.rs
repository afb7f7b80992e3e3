// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns raw source records into canonical [`Transaction`]s.
//!
//! Every field gets a default instead of an error: missing text becomes
//! `"N/A"` (or `"Untitled"` for the title), a missing amount becomes zero, an
//! unreadable date becomes `None` and an unknown payment month stays unset.

use crate::categories::CategoryMap;
use crate::models::{Month, RawRecord, Snapshot, Transaction};
use crate::utils::parse_ledger_date;
use rust_decimal::Decimal;
use tracing::debug;

pub const MISSING: &str = "N/A";
pub const UNTITLED: &str = "Untitled";

pub struct Normalizer<'a> {
    categories: &'a CategoryMap,
}

impl<'a> Normalizer<'a> {
    pub fn new(categories: &'a CategoryMap) -> Self {
        Self { categories }
    }

    pub fn normalize(&self, raw: &RawRecord) -> Transaction {
        let date = raw.date.as_deref().and_then(parse_ledger_date);
        if date.is_none() {
            debug!(raw = ?raw.date, "unparseable transaction date");
        }
        let category = text_or(&raw.expense_type, MISSING);
        let payment_month = raw
            .payment_month
            .as_deref()
            .map(str::trim)
            .and_then(Month::from_name);
        // The source records spending as positive numbers.
        let amount = match raw.amount {
            Some(a) if !a.is_zero() => -a,
            _ => Decimal::ZERO,
        };
        let installment_marker = raw
            .installment
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && *s != MISSING)
            .map(str::to_string);

        Transaction {
            date,
            institution: text_or(&raw.institution, MISSING),
            label: text_or(&raw.title, UNTITLED),
            amount,
            macro_group: self.categories.classify(&category),
            category,
            payment_month,
            payee: text_or(&raw.payee, MISSING),
            description: text_or(&raw.description, MISSING),
            installment_marker,
        }
    }

    pub fn snapshot<'r, I>(&self, records: I) -> Snapshot
    where
        I: IntoIterator<Item = &'r RawRecord>,
    {
        Snapshot::new(records.into_iter().map(|r| self.normalize(r)).collect())
    }
}

fn text_or(v: &Option<String>, default: &str) -> String {
    v.as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
