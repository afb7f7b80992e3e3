// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{month_arg, Session, NO_DATA};
use crate::analytics::installments::{detail_for, monthly_totals, project, ProjectedInstallment};
use crate::models::Month;
use crate::utils::{fmt_brl, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProjectionsReport {
    pub start: Month,
    pub totals: Vec<(Month, Decimal)>,
    pub month: Month,
    pub detail: Vec<ProjectedInstallment>,
}

pub fn handle(session: &Session, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = session.snapshot()?;
    if snapshot.is_empty() {
        println!("{}", NO_DATA);
        return Ok(());
    }
    let projections = project(snapshot.transactions(), Month::of(session.today));
    let Some(report) = build(session, sub, &projections)? else {
        println!("No installments detected.");
        return Ok(());
    };
    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }

    let rows = report
        .totals
        .iter()
        .map(|(m, v)| vec![m.to_string(), fmt_brl(*v)])
        .collect();
    println!("Future fixed cost");
    println!("{}", pretty_table(&["Month", "Amount"], rows));

    let rows = report
        .detail
        .iter()
        .map(|p| {
            vec![
                p.label.clone(),
                p.institution.clone(),
                p.installment.clone(),
                fmt_brl(p.amount),
            ]
        })
        .collect();
    println!("Installments due in {}", report.month);
    println!(
        "{}",
        pretty_table(&["Transaction", "Institution", "Installment", "Amount"], rows)
    );
    Ok(())
}

pub fn build(
    session: &Session,
    sub: &clap::ArgMatches,
    projections: &[ProjectedInstallment],
) -> Result<Option<ProjectionsReport>> {
    if projections.is_empty() {
        return Ok(None);
    }
    let start = Month::of(session.today);
    let month = month_arg(sub)?.unwrap_or(start);
    Ok(Some(ProjectionsReport {
        start,
        totals: monthly_totals(projections),
        month,
        detail: detail_for(projections, month),
    }))
}
