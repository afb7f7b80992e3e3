// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Session, NO_DATA};
use crate::models::Transaction;
use anyhow::{Context, Result};

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap().trim();
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }
    let n = export_transactions(snapshot.transactions(), &fmt, out)?;
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}

pub fn export_transactions(txs: &[Transaction], fmt: &str, out: &str) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "date",
                "payment_month",
                "institution",
                "label",
                "amount",
                "category",
                "macro_group",
                "payee",
                "description",
                "installment",
            ])?;
            for t in txs {
                wtr.write_record([
                    t.date.map(|d| d.to_string()).unwrap_or_default(),
                    t.payment_month
                        .map(|m| m.to_string())
                        .unwrap_or_default(),
                    t.institution.clone(),
                    t.label.clone(),
                    t.amount.to_string(),
                    t.category.clone(),
                    t.macro_group.to_string(),
                    t.payee.clone(),
                    t.description.clone(),
                    t.installment_marker.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(txs)?)
                .with_context(|| format!("Write {}", out))?;
        }
        other => anyhow::bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(txs.len())
}
