// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_month, Session, NO_DATA};
use crate::analytics::breakdown::{spend_by_institution, NamedTotal};
use crate::analytics::cashflow::{summarize, CashFlowSummary};
use crate::models::{default_period, Month, Transaction};
use crate::utils::{fmt_brl, fmt_date, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub month: Month,
    pub summary: CashFlowSummary,
    pub by_institution: Vec<NamedTotal>,
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

    let s = &report.summary;
    println!("Cash flow for {}", report.month);
    println!(
        "{}",
        pretty_table(
            &["Metric", "Value"],
            vec![
                vec!["Available income".into(), fmt_money(s.available_income)],
                vec!["Costs".into(), fmt_money(s.regular_expense)],
                vec!["Invested".into(), fmt_money(s.contributed)],
                vec!["Leftover".into(), fmt_money(s.leftover)],
                vec!["Savings rate".into(), format!("{:.1}%", s.savings_rate.round_dp(1))],
            ],
        )
    );

    if s.leftover < Decimal::ZERO {
        println!("Overspent by {}", fmt_money(s.leftover.abs()));
    }

    let slices = s
        .composition()
        .iter()
        .map(|f| vec![f.name.to_string(), fmt_brl(f.value)])
        .collect();
    println!("{}", pretty_table(&["Slice", "Amount"], slices));

    let banks = report
        .by_institution
        .iter()
        .map(|b| vec![b.name.clone(), fmt_brl(b.total)])
        .collect();
    println!("Costs by institution");
    println!("{}", pretty_table(&["Institution", "Amount"], banks));

    println!("Investments: {}", fmt_money(s.invested_net()));
    println!("{}", audit_table(&s.investments));
    println!("Costs: {}", fmt_money(s.regular_expense));
    println!("{}", audit_table(&s.expenses));
    Ok(())
}

pub fn build(session: &Session, sub: &clap::ArgMatches) -> Result<Option<HealthReport>> {
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        return Ok(None);
    }
    let available = snapshot.available_months();
    let Some(month) = resolve_month(sub, &available, |a| default_period(a, session.today))? else {
        return Ok(None);
    };
    let txs = snapshot.for_month(month);
    Ok(Some(HealthReport {
        month,
        by_institution: spend_by_institution(&txs),
        summary: summarize(&txs),
    }))
}

fn audit_table(txs: &[Transaction]) -> comfy_table::Table {
    let rows = txs
        .iter()
        .map(|t| {
            vec![
                fmt_date(t.date),
                t.label.clone(),
                fmt_brl(t.amount),
                t.category.clone(),
            ]
        })
        .collect();
    pretty_table(&["Date", "Transaction", "Amount", "Category"], rows)
}
