// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{resolve_month, Session, NO_DATA};
use crate::analytics::budget::{evaluate, investment_goal, BudgetLine, BudgetStatus, InvestmentGoal};
use crate::models::{default_review_period, Month};
use crate::utils::{fmt_brl, fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct GoalsReport {
    pub month: Month,
    pub investments: InvestmentGoal,
    pub budgets: Vec<BudgetLine>,
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

    let inv = &report.investments;
    let delta = if inv.difference < Decimal::ZERO {
        format!("-{} (below target)", fmt_money(inv.difference.abs()))
    } else {
        format!("{} (above target)", fmt_money(inv.difference))
    };
    println!("Investment goal for {}", report.month);
    println!(
        "{}",
        pretty_table(
            &["Target", "Invested", "Delta", "Attainment"],
            vec![vec![
                fmt_money(inv.target),
                fmt_money(inv.invested),
                delta,
                format!("{:.1}%", inv.attainment.round_dp(1)),
            ]],
        )
    );

    let rows = report
        .budgets
        .iter()
        .map(|b| {
            let status = match b.status {
                BudgetStatus::Under => format!("{} left", fmt_brl(b.slack)),
                BudgetStatus::Over => format!("-{} over", fmt_brl(b.overage)),
            };
            vec![
                b.group.to_string(),
                fmt_brl(b.ceiling),
                fmt_brl(b.actual),
                fmt_brl(b.within_budget),
                fmt_brl(b.slack),
                fmt_brl(b.overage),
                status,
            ]
        })
        .collect();
    println!("Spending ceilings");
    println!(
        "{}",
        pretty_table(
            &["Group", "Ceiling", "Spent", "Within", "Slack", "Overage", "Status"],
            rows,
        )
    );
    Ok(())
}

pub fn build(session: &Session, sub: &clap::ArgMatches) -> Result<Option<GoalsReport>> {
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        return Ok(None);
    }
    let available = snapshot.available_months();
    let Some(month) =
        resolve_month(sub, &available, |a| default_review_period(a, session.today))?
    else {
        return Ok(None);
    };
    let txs = snapshot.for_month(month);
    let goals = &session.settings.goals;
    Ok(Some(GoalsReport {
        month,
        investments: investment_goal(&txs, goals.investments),
        budgets: evaluate(&txs, goals),
    }))
}
