// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly cash-flow health.
//!
//! Card-bill payments are dropped before anything is summed, and investment
//! movements are netted separately from regular income and spending. A month
//! where redemptions exceed contributions folds the net redemption back into
//! the income available for that month.

use crate::analytics::sort_by_date;
use crate::models::{Month, Snapshot, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CashFlowSummary {
    pub available_income: Decimal,
    pub regular_expense: Decimal,
    pub contributed: Decimal,
    pub leftover: Decimal,
    pub saved: Decimal,
    /// Percentage, `0` when there is no available income.
    pub savings_rate: Decimal,
    /// Real expenses of the period, for auditing.
    pub expenses: Vec<Transaction>,
    pub investments: Vec<Transaction>,
}

/// One slice of the month's money: what was left, what was invested, what
/// was spent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowSlice {
    pub name: &'static str,
    pub value: Decimal,
}

impl CashFlowSummary {
    pub fn composition(&self) -> [FlowSlice; 3] {
        [
            FlowSlice {
                name: "Leftover",
                value: self.leftover.max(Decimal::ZERO),
            },
            FlowSlice {
                name: "Invested",
                value: self.contributed,
            },
            FlowSlice {
                name: "Spent",
                value: self.regular_expense,
            },
        ]
    }

    /// Net investment position as the user reads it: positive when money went
    /// in, negative on net redemption.
    pub fn invested_net(&self) -> Decimal {
        -self.investments.iter().map(|t| t.amount).sum::<Decimal>()
    }
}

pub fn summarize(transactions: &[Transaction]) -> CashFlowSummary {
    let mut regular_income = Decimal::ZERO;
    let mut regular_expense = Decimal::ZERO;
    let mut investment_net = Decimal::ZERO;
    let mut expenses = Vec::new();
    let mut investments = Vec::new();

    for t in transactions.iter().filter(|t| !t.is_settlement()) {
        if t.is_investment() {
            investment_net += t.amount;
            investments.push(t.clone());
        } else if t.amount > Decimal::ZERO {
            regular_income += t.amount;
        } else if t.amount < Decimal::ZERO {
            regular_expense += t.amount.abs();
            expenses.push(t.clone());
        }
    }

    let (contributed, available_income) = if investment_net < Decimal::ZERO {
        (investment_net.abs(), regular_income)
    } else {
        (Decimal::ZERO, regular_income + investment_net)
    };

    let leftover = available_income - regular_expense - contributed;
    let saved = leftover.max(Decimal::ZERO) + contributed;
    let savings_rate = if available_income > Decimal::ZERO {
        saved / available_income * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    sort_by_date(&mut expenses);
    sort_by_date(&mut investments);

    CashFlowSummary {
        available_income,
        regular_expense,
        contributed,
        leftover,
        saved,
        savings_rate,
        expenses,
        investments,
    }
}

pub fn health_for(snapshot: &Snapshot, month: Month) -> CashFlowSummary {
    summarize(&snapshot.for_month(month))
}
