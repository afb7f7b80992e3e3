// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Forward cost projection from installment purchases.
//!
//! A transaction marked `k/n` still has `n - k + 1` payments to go, one per
//! month starting at the current month. Months wrap modulo 12, so a plan
//! running past a year lands on earlier months of the same cycle.

use crate::models::{Month, Transaction};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Longest plan taken seriously. Anything above is treated as a typo.
pub const MAX_INSTALLMENTS: u32 = 480;

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d+)\s*/\s*(\d+)\s*$").expect("installment regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedInstallment {
    pub month: Month,
    pub amount: Decimal,
    pub label: String,
    pub institution: String,
    pub installment: String,
}

/// Parses `current/total`. Returns `None` for anything else, including
/// `current > total` and totals above [`MAX_INSTALLMENTS`].
pub fn parse_marker(marker: &str) -> Option<(u32, u32)> {
    let caps = MARKER.captures(marker)?;
    let current: u32 = caps[1].parse().ok()?;
    let total: u32 = caps[2].parse().ok()?;
    (current <= total && total <= MAX_INSTALLMENTS).then_some((current, total))
}

pub fn project(transactions: &[Transaction], start: Month) -> Vec<ProjectedInstallment> {
    let mut out = Vec::new();
    for t in transactions {
        let Some(marker) = t.installment_marker.as_deref() else {
            continue;
        };
        let Some((current, total)) = parse_marker(marker) else {
            debug!(marker, label = %t.label, "skipping installment marker");
            continue;
        };
        let remaining = total - current + 1;
        let amount = t.amount.abs();
        for i in 0..remaining {
            out.push(ProjectedInstallment {
                month: start.offset(i as usize),
                amount,
                label: t.label.clone(),
                institution: t.institution.clone(),
                installment: format!("{}/{}", current + i, total),
            });
        }
    }
    out
}

/// Total projected cost per month, in calendar order.
pub fn monthly_totals(projections: &[ProjectedInstallment]) -> Vec<(Month, Decimal)> {
    let mut acc: BTreeMap<Month, Decimal> = BTreeMap::new();
    for p in projections {
        *acc.entry(p.month).or_insert(Decimal::ZERO) += p.amount;
    }
    acc.into_iter().collect()
}

/// Installments due in `month`, largest first.
pub fn detail_for(projections: &[ProjectedInstallment], month: Month) -> Vec<ProjectedInstallment> {
    let mut v: Vec<ProjectedInstallment> = projections
        .iter()
        .filter(|p| p.month == month)
        .cloned()
        .collect();
    v.sort_by(|a, b| b.amount.cmp(&a.amount));
    v
}
