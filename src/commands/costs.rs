// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::history::share_table;
use super::{month_arg, Session, NO_DATA};
use crate::analytics::breakdown::{
    drill_down, expense_evolution, spending_groups, top_payees, GroupMonthTotal, NamedTotal,
    Share,
};
use crate::models::{MacroGroup, Month};
use crate::utils::{fmt_brl, maybe_print_json, pretty_table};
use anyhow::{anyhow, Result};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CostsReport {
    pub evolution: Vec<GroupMonthTotal>,
    pub group: Option<MacroGroup>,
    pub month: Option<Month>,
    pub drill_down: Vec<Share>,
    pub top_payees: Vec<NamedTotal>,
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
        .evolution
        .iter()
        .map(|e| vec![e.month.to_string(), e.group.to_string(), fmt_brl(e.total)])
        .collect();
    println!("Costs by group");
    println!("{}", pretty_table(&["Month", "Group", "Amount"], rows));

    if let Some(group) = report.group {
        let period = report
            .month
            .map(|m| m.to_string())
            .unwrap_or_else(|| "all months".to_string());
        println!("{} in {}", group, period);
        println!("{}", share_table(&["Category", "Transaction", "Amount"], &report.drill_down));
    }

    if report.top_payees.is_empty() {
        println!("No payees to rank after filtering.");
    } else {
        let rows = report
            .top_payees
            .iter()
            .map(|p| vec![p.name.clone(), fmt_brl(p.total)])
            .collect();
        println!("Top payees this year");
        println!("{}", pretty_table(&["Payee", "Total"], rows));
    }
    Ok(())
}

pub fn build(session: &Session, sub: &clap::ArgMatches) -> Result<Option<CostsReport>> {
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        return Ok(None);
    }
    let group = match sub.get_one::<String>("group") {
        Some(raw) => Some(
            MacroGroup::parse_arg(raw).ok_or_else(|| anyhow!("Unknown group '{}'", raw.trim()))?,
        ),
        None => spending_groups(&snapshot).first().copied(),
    };
    let month = month_arg(sub)?;
    let top = sub.get_one::<usize>("top").copied().unwrap_or(10);

    Ok(Some(CostsReport {
        evolution: expense_evolution(&snapshot),
        drill_down: group
            .map(|g| drill_down(&snapshot, g, month))
            .unwrap_or_default(),
        group,
        month,
        top_payees: top_payees(&snapshot, &session.settings.owner, top),
    }))
}
