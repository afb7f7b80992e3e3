// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod breakdown;
pub mod budget;
pub mod cashflow;
pub mod installments;
pub mod networth;

use crate::models::Transaction;

/// Oldest first; rows without a readable date go last.
pub(crate) fn sort_by_date(txs: &mut [Transaction]) {
    txs.sort_by_key(|t| (t.date.is_none(), t.date));
}
