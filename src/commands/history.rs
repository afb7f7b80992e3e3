// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{Session, NO_DATA};
use crate::analytics::breakdown::{
    expense_composition, income_composition, monthly_net, MonthTotal, Share,
};
use crate::utils::{fmt_brl, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HistoryReport {
    pub monthly_net: Vec<MonthTotal>,
    pub income: Vec<Share>,
    pub costs: Vec<Share>,
}

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let Some(report) = build(session, sub)? else {
        println!("{}", NO_DATA);
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let rows = report
        .monthly_net
        .iter()
        .map(|m| vec![m.month.to_string(), fmt_brl(m.total)])
        .collect();
    println!("Monthly balances");
    println!("{}", pretty_table(&["Month", "Balance"], rows));

    println!("Income this year");
    println!("{}", share_table(&["Category", "Description", "Amount"], &report.income));
    println!("Costs this year");
    println!("{}", share_table(&["Group", "Category", "Amount"], &report.costs));
    Ok(())
}

pub fn build(session: &Session, _sub: &clap::ArgMatches) -> Result<Option<HistoryReport>> {
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        return Ok(None);
    }
    Ok(Some(HistoryReport {
        monthly_net: monthly_net(&snapshot),
        income: income_composition(&snapshot),
        costs: expense_composition(&snapshot),
    }))
}

pub(crate) fn share_table(headers: &[&str], shares: &[Share]) -> comfy_table::Table {
    let rows = shares
        .iter()
        .map(|s| vec![s.parent.clone(), s.child.clone(), fmt_brl(s.total)])
        .collect();
    pretty_table(headers, rows)
}
