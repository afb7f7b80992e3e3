// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::Session;
use crate::ledger::SqliteCache;
use crate::normalize::Normalizer;
use anyhow::Result;
use tracing::info;

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    if sub.get_flag("clear") {
        let n = SqliteCache::new(session.conn()).clear()?;
        println!("Dropped {} cached snapshot(s)", n);
        return Ok(());
    }
    let records = session.records(true)?;
    let snapshot = Normalizer::new(&session.categories).snapshot(&records);
    let undated = snapshot
        .transactions()
        .iter()
        .filter(|t| t.date.is_none())
        .count();
    let unbucketed = snapshot
        .transactions()
        .iter()
        .filter(|t| t.payment_month.is_none())
        .count();
    info!(undated, unbucketed, "normalized ledger");
    let months: Vec<String> = snapshot
        .available_months()
        .iter()
        .map(|m| m.to_string())
        .collect();
    println!("Synced {} transactions", snapshot.len());
    if !months.is_empty() {
        println!("Months with data: {}", months.join(", "));
    }
    if undated > 0 || unbucketed > 0 {
        println!(
            "{} without a readable date, {} without a known payment month",
            undated, unbucketed
        );
    }
    Ok(())
}
