// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{GoalConfig, MacroGroup, Transaction};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Under,
    Over,
}

/// Spend of one group against its ceiling, split so the three parts always
/// add up to `max(actual, ceiling)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetLine {
    pub group: MacroGroup,
    pub ceiling: Decimal,
    pub actual: Decimal,
    pub within_budget: Decimal,
    pub slack: Decimal,
    pub overage: Decimal,
    pub status: BudgetStatus,
}

impl BudgetLine {
    pub fn decompose(group: MacroGroup, actual: Decimal, ceiling: Decimal) -> Self {
        if actual <= ceiling {
            Self {
                group,
                ceiling,
                actual,
                within_budget: actual,
                slack: ceiling - actual,
                overage: Decimal::ZERO,
                status: BudgetStatus::Under,
            }
        } else {
            Self {
                group,
                ceiling,
                actual,
                within_budget: ceiling,
                slack: Decimal::ZERO,
                overage: actual - ceiling,
                status: BudgetStatus::Over,
            }
        }
    }

    pub fn total(&self) -> Decimal {
        self.within_budget + self.slack + self.overage
    }
}

/// Real spend per macro-group for the given transactions.
pub fn spend_by_group(transactions: &[Transaction]) -> HashMap<MacroGroup, Decimal> {
    let mut acc: HashMap<MacroGroup, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_real_expense()) {
        *acc.entry(t.macro_group).or_insert(Decimal::ZERO) += t.amount.abs();
    }
    acc
}

pub fn evaluate(transactions: &[Transaction], goals: &GoalConfig) -> Vec<BudgetLine> {
    let spent = spend_by_group(transactions);
    goals
        .ceilings()
        .into_iter()
        .map(|(group, ceiling)| {
            let actual = spent.get(&group).copied().unwrap_or(Decimal::ZERO);
            BudgetLine::decompose(group, actual, ceiling)
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestmentGoal {
    pub target: Decimal,
    pub invested: Decimal,
    /// `invested - target`; negative means below target.
    pub difference: Decimal,
    /// Percentage of the target reached, `0` for a zero target.
    pub attainment: Decimal,
    /// Attainment as a fraction capped at 1.
    pub progress: Decimal,
}

pub fn investment_goal(transactions: &[Transaction], target: Decimal) -> InvestmentGoal {
    let net: Decimal = transactions
        .iter()
        .filter(|t| t.is_investment())
        .map(|t| t.amount)
        .sum();
    let invested = if net < Decimal::ZERO {
        net.abs()
    } else {
        Decimal::ZERO
    };
    let attainment = if target > Decimal::ZERO {
        invested / target * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    InvestmentGoal {
        target,
        invested,
        difference: invested - target,
        attainment,
        progress: (attainment / Decimal::ONE_HUNDRED).min(Decimal::ONE),
    }
}
