// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category label used by card-bill payments. These only move money between
/// accounts, the purchases behind them are already in the ledger.
pub const SETTLEMENT_MARKER: &str = "pagamento de cartão";

/// The twelve payment-month buckets of the ledger, in calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    #[serde(rename = "Janeiro")]
    January,
    #[serde(rename = "Fevereiro")]
    February,
    #[serde(rename = "Março")]
    March,
    #[serde(rename = "Abril")]
    April,
    #[serde(rename = "Maio")]
    May,
    #[serde(rename = "Junho")]
    June,
    #[serde(rename = "Julho")]
    July,
    #[serde(rename = "Agosto")]
    August,
    #[serde(rename = "Setembro")]
    September,
    #[serde(rename = "Outubro")]
    October,
    #[serde(rename = "Novembro")]
    November,
    #[serde(rename = "Dezembro")]
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based position in the year.
    pub fn ordinal(self) -> usize {
        self as usize
    }

    pub fn from_ordinal(ix: usize) -> Month {
        Month::ALL[ix % 12]
    }

    /// The month `i` steps ahead, wrapping around December.
    pub fn offset(self, i: usize) -> Month {
        Month::from_ordinal(self.ordinal() + i)
    }

    pub fn previous(self) -> Month {
        Month::from_ordinal(self.ordinal() + 11)
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "Janeiro",
            Month::February => "Fevereiro",
            Month::March => "Março",
            Month::April => "Abril",
            Month::May => "Maio",
            Month::June => "Junho",
            Month::July => "Julho",
            Month::August => "Agosto",
            Month::September => "Setembro",
            Month::October => "Outubro",
            Month::November => "Novembro",
            Month::December => "Dezembro",
        }
    }

    /// Exact match against the canonical ledger label.
    pub fn from_name(s: &str) -> Option<Month> {
        Month::ALL.into_iter().find(|m| m.name() == s)
    }

    /// Lenient parser for user input: canonical names in any case, or 1..=12.
    pub fn parse_arg(s: &str) -> Option<Month> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return (1..=12).contains(&n).then(|| Month::from_ordinal(n - 1));
        }
        let lower = s.to_lowercase();
        Month::ALL
            .into_iter()
            .find(|m| m.name().to_lowercase() == lower)
    }

    pub fn of(date: NaiveDate) -> Month {
        Month::from_ordinal(date.month0() as usize)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coarse bucket a fine-grained category rolls up to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MacroGroup {
    #[serde(rename = "Rendas")]
    Income,
    #[serde(rename = "Despesas essenciais")]
    Essential,
    #[serde(rename = "Gastos não essenciais")]
    NonEssential,
    #[serde(rename = "Investimentos")]
    Investments,
    #[serde(rename = "Impostos e taxas")]
    TaxesAndFees,
    #[serde(rename = "Outros")]
    Other,
}

impl MacroGroup {
    pub const ALL: [MacroGroup; 6] = [
        MacroGroup::Income,
        MacroGroup::Essential,
        MacroGroup::NonEssential,
        MacroGroup::Investments,
        MacroGroup::TaxesAndFees,
        MacroGroup::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MacroGroup::Income => "Rendas",
            MacroGroup::Essential => "Despesas essenciais",
            MacroGroup::NonEssential => "Gastos não essenciais",
            MacroGroup::Investments => "Investimentos",
            MacroGroup::TaxesAndFees => "Impostos e taxas",
            MacroGroup::Other => "Outros",
        }
    }

    pub fn parse_arg(s: &str) -> Option<MacroGroup> {
        let lower = s.trim().to_lowercase();
        MacroGroup::ALL.into_iter().find(|g| {
            g.name().to_lowercase() == lower || format!("{:?}", g).to_lowercase() == lower
        })
    }
}

impl fmt::Display for MacroGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A ledger row as delivered by a source, before any cleanup. The amount keeps
/// the source's sign: positive is money going out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: Option<String>,
    pub institution: Option<String>,
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub expense_type: Option<String>,
    pub payment_month: Option<String>,
    pub payee: Option<String>,
    pub description: Option<String>,
    pub installment: Option<String>,
}

/// Canonical transaction. Negative amounts are outflows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: Option<NaiveDate>,
    pub institution: String,
    pub label: String,
    pub amount: Decimal,
    pub category: String,
    pub payment_month: Option<Month>,
    pub payee: String,
    pub description: String,
    pub installment_marker: Option<String>,
    pub macro_group: MacroGroup,
}

impl Transaction {
    pub fn is_settlement(&self) -> bool {
        self.category.to_lowercase().contains(SETTLEMENT_MARKER)
    }

    pub fn is_investment(&self) -> bool {
        self.macro_group == MacroGroup::Investments
    }

    /// Outflow that counts as consumption: not a card-bill payment and not
    /// money moved into investments.
    pub fn is_real_expense(&self) -> bool {
        self.amount < Decimal::ZERO && !self.is_settlement() && !self.is_investment()
    }
}

/// Spending ceilings per expense group plus the monthly investment target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalConfig {
    pub essential: Decimal,
    pub non_essential: Decimal,
    pub taxes: Decimal,
    pub investments: Decimal,
}

impl GoalConfig {
    pub fn ceilings(&self) -> [(MacroGroup, Decimal); 3] {
        [
            (MacroGroup::Essential, self.essential),
            (MacroGroup::NonEssential, self.non_essential),
            (MacroGroup::TaxesAndFees, self.taxes),
        ]
    }
}

/// Balances at the start of the cycle. Never mutated by the analytics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetWorthBaseline {
    pub fixed_income: Decimal,
    pub house_debt: Decimal,
    pub land_debt: Decimal,
}

/// Immutable set of transactions for one analysis pass.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    transactions: Vec<Transaction>,
}

impl Snapshot {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn for_month(&self, month: Month) -> Vec<Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.payment_month == Some(month))
            .cloned()
            .collect()
    }

    /// Months that have at least one transaction, in calendar order.
    pub fn available_months(&self) -> Vec<Month> {
        let mut seen = [false; 12];
        for t in &self.transactions {
            if let Some(m) = t.payment_month {
                seen[m.ordinal()] = true;
            }
        }
        Month::ALL
            .into_iter()
            .filter(|m| seen[m.ordinal()])
            .collect()
    }
}

/// Period shown by default: the current month if the ledger has it, otherwise
/// the first month with data.
pub fn default_period(available: &[Month], today: NaiveDate) -> Option<Month> {
    let current = Month::of(today);
    if available.contains(&current) {
        Some(current)
    } else {
        available.first().copied()
    }
}

/// Period for goal review: the month with data right before the current one.
/// Falls back to the last month with data.
pub fn default_review_period(available: &[Month], today: NaiveDate) -> Option<Month> {
    let current = Month::of(today);
    match available.iter().position(|m| *m == current) {
        Some(ix) if ix > 0 => Some(available[ix - 1]),
        _ => available.last().copied(),
    }
}
