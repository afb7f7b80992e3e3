// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Year-level views of the ledger: monthly balances, where income came from,
//! where spending went, and who received it.

use crate::models::{MacroGroup, Month, Snapshot, Transaction};
use crate::normalize::MISSING;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotal {
    pub month: Month,
    pub total: Decimal,
}

/// Net of every transaction per payment month.
pub fn monthly_net(snapshot: &Snapshot) -> Vec<MonthTotal> {
    let mut acc: BTreeMap<Month, Decimal> = BTreeMap::new();
    for t in snapshot.transactions() {
        if let Some(m) = t.payment_month {
            *acc.entry(m).or_insert(Decimal::ZERO) += t.amount;
        }
    }
    acc.into_iter()
        .map(|(month, total)| MonthTotal { month, total })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub parent: String,
    pub child: String,
    pub total: Decimal,
}

fn shares(acc: HashMap<(String, String), Decimal>) -> Vec<Share> {
    let mut v: Vec<Share> = acc
        .into_iter()
        .map(|((parent, child), total)| Share {
            parent,
            child,
            total,
        })
        .collect();
    v.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.parent.cmp(&b.parent))
            .then_with(|| a.child.cmp(&b.child))
    });
    v
}

/// Positive flows by (category, description), ignoring card-bill payments.
pub fn income_composition(snapshot: &Snapshot) -> Vec<Share> {
    let mut acc: HashMap<(String, String), Decimal> = HashMap::new();
    for t in snapshot
        .transactions()
        .iter()
        .filter(|t| t.amount > Decimal::ZERO && !t.is_settlement())
    {
        *acc.entry((t.category.clone(), t.description.clone()))
            .or_insert(Decimal::ZERO) += t.amount;
    }
    shares(acc)
}

/// Outflows by (macro-group, category), ignoring card-bill payments.
/// Investment contributions are included here.
pub fn expense_composition(snapshot: &Snapshot) -> Vec<Share> {
    let mut acc: HashMap<(String, String), Decimal> = HashMap::new();
    for t in snapshot
        .transactions()
        .iter()
        .filter(|t| t.amount < Decimal::ZERO && !t.is_settlement())
    {
        *acc.entry((t.macro_group.name().to_string(), t.category.clone()))
            .or_insert(Decimal::ZERO) += t.amount.abs();
    }
    shares(acc)
}

/// Outflow shown in the cost views: any spend that is not a card-bill
/// payment and not filed under an "investiment..." category. Unlike budget
/// spend, contributions to `Imóveis` or `Renda fixa` stay in.
fn is_cost(t: &Transaction) -> bool {
    t.amount < Decimal::ZERO
        && !t.is_settlement()
        && !t.category.to_lowercase().contains("investiment")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMonthTotal {
    pub month: Month,
    pub group: MacroGroup,
    pub total: Decimal,
}

/// Costs folded into (month, group) buckets, in calendar order.
pub fn expense_evolution(snapshot: &Snapshot) -> Vec<GroupMonthTotal> {
    let mut acc: BTreeMap<(Month, MacroGroup), Decimal> = BTreeMap::new();
    for t in snapshot.transactions().iter().filter(|t| is_cost(t)) {
        if let Some(m) = t.payment_month {
            *acc.entry((m, t.macro_group)).or_insert(Decimal::ZERO) += t.amount.abs();
        }
    }
    acc.into_iter()
        .map(|((month, group), total)| GroupMonthTotal { month, group, total })
        .collect()
}

/// Groups that have costs, in enum order.
pub fn spending_groups(snapshot: &Snapshot) -> Vec<MacroGroup> {
    let mut groups: Vec<MacroGroup> = snapshot
        .transactions()
        .iter()
        .filter(|t| is_cost(t))
        .map(|t| t.macro_group)
        .collect();
    groups.sort_unstable();
    groups.dedup();
    groups
}

/// Costs of one group by (category, label). `month = None` covers the whole
/// year.
pub fn drill_down(snapshot: &Snapshot, group: MacroGroup, month: Option<Month>) -> Vec<Share> {
    let mut acc: HashMap<(String, String), Decimal> = HashMap::new();
    for t in snapshot.transactions().iter().filter(|t| {
        is_cost(t)
            && t.macro_group == group
            && month.is_none_or(|m| t.payment_month == Some(m))
    }) {
        *acc.entry((t.category.clone(), t.label.clone()))
            .or_insert(Decimal::ZERO) += t.amount.abs();
    }
    shares(acc)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedTotal {
    pub name: String,
    pub total: Decimal,
}

fn ranked(acc: HashMap<String, Decimal>) -> Vec<NamedTotal> {
    let mut v: Vec<NamedTotal> = acc
        .into_iter()
        .map(|(name, total)| NamedTotal { name, total })
        .collect();
    v.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    v
}

/// Real spend per institution.
pub fn spend_by_institution(transactions: &[Transaction]) -> Vec<NamedTotal> {
    let mut acc: HashMap<String, Decimal> = HashMap::new();
    for t in transactions.iter().filter(|t| t.is_real_expense()) {
        *acc.entry(t.institution.clone()).or_insert(Decimal::ZERO) += t.amount.abs();
    }
    ranked(acc)
}

/// Largest receivers of costs. Transfers to the owner and to card
/// issuers are left out, as are rows without a payee.
pub fn top_payees(snapshot: &Snapshot, owner: &str, limit: usize) -> Vec<NamedTotal> {
    let owner = owner.trim().to_lowercase();
    let mut acc: HashMap<String, Decimal> = HashMap::new();
    for t in snapshot.transactions().iter().filter(|t| is_cost(t)) {
        if t.payee == MISSING {
            continue;
        }
        let payee = t.payee.to_lowercase();
        if (!owner.is_empty() && payee.contains(&owner))
            || payee.contains("cartão")
            || payee.contains("cartao")
        {
            continue;
        }
        *acc.entry(t.payee.clone()).or_insert(Decimal::ZERO) += t.amount.abs();
    }
    let mut v = ranked(acc);
    v.truncate(limit);
    v
}
