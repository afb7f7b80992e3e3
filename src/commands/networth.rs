// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Session, NO_DATA};
use crate::analytics::networth::{report, LiabilityEffort};
use crate::utils::{fmt_brl, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }
    let r = report(&snapshot, &session.settings.baseline);
    if maybe_print_json(json_flag, jsonl_flag, &r)? {
        return Ok(());
    }

    println!("Net worth (assets - debts): {}", fmt_money(r.net_worth));
    println!(
        "Fixed income: {} ({} net growth this year)",
        fmt_money(r.fixed_income.current),
        fmt_money(r.fixed_income.year_impact)
    );
    let rows = r
        .fixed_income
        .points
        .iter()
        .map(|p| vec![p.month.to_string(), fmt_brl(p.impact), fmt_brl(p.balance)])
        .collect();
    println!("{}", pretty_table(&["Month", "Change", "Balance"], rows));

    println!("Debt figures are cash paid against the starting balance, without interest.");
    print_liability("House", &r.house);
    print_liability("Land", &r.land);
    Ok(())
}

fn print_liability(title: &str, l: &LiabilityEffort) {
    println!(
        "{}: debt {} | paid this year {} | estimated remaining {}",
        title,
        fmt_money(l.baseline),
        fmt_money(l.total_paid),
        fmt_money(l.estimated_remaining)
    );
    if l.points.is_empty() {
        return;
    }
    let rows = l
        .points
        .iter()
        .map(|p| {
            vec![
                p.month.to_string(),
                fmt_brl(p.paid),
                fmt_brl(p.cumulative_paid),
                fmt_brl(p.estimated_remaining),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Paid", "Cumulative", "Est. remaining"], rows)
    );
}
