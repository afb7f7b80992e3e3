// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Net worth: a fixed-income balance rebuilt from the ledger, minus two
//! tracked debts. Debt figures are cash paid against the configured
//! balances, with no interest modelled.

use crate::models::{Month, NetWorthBaseline, Snapshot, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub const YIELD: &str = "Rendimento";
pub const FIXED_INCOME: &str = "Renda fixa";
pub const HOUSE: &str = "Moradia";
pub const LAND: &str = "Imóveis";

/// Signed effect of one transaction on the fixed-income balance.
pub fn impact(t: &Transaction) -> Decimal {
    match t.category.as_str() {
        YIELD => t.amount.abs(),
        FIXED_INCOME if t.amount < Decimal::ZERO => t.amount.abs(),
        FIXED_INCOME if t.amount > Decimal::ZERO => -t.amount.abs(),
        _ => Decimal::ZERO,
    }
}

fn tracks_fixed_income(t: &Transaction) -> bool {
    t.category == YIELD || t.category == FIXED_INCOME
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancePoint {
    pub month: Month,
    pub impact: Decimal,
    pub balance: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedIncomeSeries {
    pub initial: Decimal,
    /// Sum of every impact in the ledger, with or without a payment month.
    pub year_impact: Decimal,
    pub current: Decimal,
    pub points: Vec<BalancePoint>,
}

pub fn fixed_income_series(transactions: &[Transaction], initial: Decimal) -> FixedIncomeSeries {
    let mut per_month: BTreeMap<Month, Decimal> = BTreeMap::new();
    let mut year_impact = Decimal::ZERO;
    for t in transactions.iter().filter(|t| tracks_fixed_income(t)) {
        let i = impact(t);
        year_impact += i;
        if let Some(m) = t.payment_month {
            *per_month.entry(m).or_insert(Decimal::ZERO) += i;
        }
    }

    let mut running = Decimal::ZERO;
    let points = per_month
        .into_iter()
        .map(|(month, impact)| {
            running += impact;
            BalancePoint {
                month,
                impact,
                balance: initial + running,
            }
        })
        .collect();

    FixedIncomeSeries {
        initial,
        year_impact,
        current: initial + year_impact,
        points,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffortPoint {
    pub month: Month,
    pub paid: Decimal,
    pub cumulative_paid: Decimal,
    pub estimated_remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LiabilityEffort {
    pub category: String,
    pub baseline: Decimal,
    pub total_paid: Decimal,
    /// `baseline - total_paid`; an interest-free approximation.
    pub estimated_remaining: Decimal,
    pub points: Vec<EffortPoint>,
}

pub fn liability_effort(
    transactions: &[Transaction],
    category: &str,
    baseline: Decimal,
) -> LiabilityEffort {
    let mut per_month: BTreeMap<Month, Decimal> = BTreeMap::new();
    let mut total_paid = Decimal::ZERO;
    for t in transactions
        .iter()
        .filter(|t| t.category == category && t.amount < Decimal::ZERO)
    {
        let paid = t.amount.abs();
        total_paid += paid;
        if let Some(m) = t.payment_month {
            *per_month.entry(m).or_insert(Decimal::ZERO) += paid;
        }
    }

    let mut cumulative = Decimal::ZERO;
    let points = per_month
        .into_iter()
        .map(|(month, paid)| {
            cumulative += paid;
            EffortPoint {
                month,
                paid,
                cumulative_paid: cumulative,
                estimated_remaining: baseline - cumulative,
            }
        })
        .collect();

    LiabilityEffort {
        category: category.to_string(),
        baseline,
        total_paid,
        estimated_remaining: baseline - total_paid,
        points,
    }
}

pub fn net_worth(fixed_income_balance: Decimal, baseline: &NetWorthBaseline) -> Decimal {
    fixed_income_balance - baseline.house_debt - baseline.land_debt
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NetWorthReport {
    pub net_worth: Decimal,
    pub fixed_income: FixedIncomeSeries,
    pub house: LiabilityEffort,
    pub land: LiabilityEffort,
}

pub fn report(snapshot: &Snapshot, baseline: &NetWorthBaseline) -> NetWorthReport {
    let txs = snapshot.transactions();
    let fixed_income = fixed_income_series(txs, baseline.fixed_income);
    NetWorthReport {
        net_worth: net_worth(fixed_income.current, baseline),
        house: liability_effort(txs, HOUSE, baseline.house_debt),
        land: liability_effort(txs, LAND, baseline.land_debt),
        fixed_income,
    }
}
