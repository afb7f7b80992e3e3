// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashlens::analytics::cashflow::{health_for, summarize};
use cashlens::categories::CategoryMap;
use cashlens::models::{Month, Snapshot, Transaction};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

fn tx(category: &str, amount: i64, day: u32) -> Transaction {
    Transaction {
        date: NaiveDate::from_ymd_opt(2026, 3, day),
        institution: "Nubank".into(),
        label: format!("{} {}", category, day),
        amount: Decimal::from(amount),
        category: category.into(),
        payment_month: Some(Month::March),
        payee: "N/A".into(),
        description: "N/A".into(),
        installment_marker: None,
        macro_group: CategoryMap::standard().classify(category),
    }
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[test]
fn contribution_counts_as_saved() {
    let txs = vec![
        tx("Remuneração", 5000, 5),
        tx("Supermercado", -1200, 8),
        tx("Renda fixa", -800, 10),
    ];
    let s = summarize(&txs);
    assert_eq!(s.available_income, dec("5000"));
    assert_eq!(s.regular_expense, dec("1200"));
    assert_eq!(s.contributed, dec("800"));
    assert_eq!(s.leftover, dec("3000"));
    assert_eq!(s.saved, dec("3800"));
    assert_eq!(s.savings_rate, dec("76.0"));
    assert_eq!(s.expenses.len(), 1);
    assert_eq!(s.investments.len(), 1);
    assert_eq!(s.invested_net(), dec("800"));
}

#[test]
fn redemption_adds_to_available_income() {
    let txs = vec![
        tx("Remuneração", 5000, 5),
        tx("Supermercado", -1200, 8),
        tx("Renda fixa", 300, 10),
    ];
    let s = summarize(&txs);
    assert_eq!(s.contributed, Decimal::ZERO);
    assert_eq!(s.available_income, dec("5300"));
    assert_eq!(s.leftover, dec("4100"));
    assert_eq!(s.savings_rate.round_dp(1), dec("77.4"));
    assert_eq!(s.invested_net(), dec("-300"));
}

#[test]
fn card_bill_payments_are_ignored() {
    let txs = vec![
        tx("Remuneração", 5000, 5),
        tx("Pagamento de cartão", -2500, 6),
        tx("PAGAMENTO DE CARTÃO Nubank", 2500, 6),
        tx("Supermercado", -1000, 8),
    ];
    let s = summarize(&txs);
    assert_eq!(s.available_income, dec("5000"));
    assert_eq!(s.regular_expense, dec("1000"));
    assert!(s.expenses.iter().all(|t| !t.is_settlement()));
}

#[test]
fn no_income_means_zero_rate() {
    let s = summarize(&[tx("Supermercado", -300, 2)]);
    assert_eq!(s.available_income, Decimal::ZERO);
    assert_eq!(s.leftover, dec("-300"));
    assert_eq!(s.saved, Decimal::ZERO);
    assert_eq!(s.savings_rate, Decimal::ZERO);

    let empty = summarize(&[]);
    assert_eq!(empty.savings_rate, Decimal::ZERO);
    assert!(empty.expenses.is_empty());
}

#[test]
fn overspending_keeps_negative_leftover_out_of_savings() {
    let txs = vec![
        tx("Remuneração", 1000, 1),
        tx("Lazer", -900, 3),
        tx("Renda fixa", -400, 4),
    ];
    let s = summarize(&txs);
    assert_eq!(s.leftover, dec("-300"));
    assert_eq!(s.saved, dec("400"));
    assert_eq!(s.savings_rate, dec("40"));
    let parts = s.composition();
    assert_eq!(parts[0].value, Decimal::ZERO);
    assert_eq!(parts[1].value, dec("400"));
    assert_eq!(parts[2].value, dec("900"));
}

#[test]
fn expenses_are_listed_by_date() {
    let mut undated = tx("Lazer", -10, 1);
    undated.date = None;
    let txs = vec![
        tx("Supermercado", -50, 20),
        undated,
        tx("Transporte", -30, 2),
    ];
    let s = summarize(&txs);
    let days: Vec<Option<NaiveDate>> = s.expenses.iter().map(|t| t.date).collect();
    assert_eq!(
        days,
        vec![
            NaiveDate::from_ymd_opt(2026, 3, 2),
            NaiveDate::from_ymd_opt(2026, 3, 20),
            None
        ]
    );
}

#[test]
fn health_only_looks_at_the_requested_month() {
    let mut april = tx("Supermercado", -999, 1);
    april.payment_month = Some(Month::April);
    let snap = Snapshot::new(vec![tx("Remuneração", 2000, 1), tx("Lazer", -500, 2), april]);
    let s = health_for(&snap, Month::March);
    assert_eq!(s.regular_expense, dec("500"));
    assert_eq!(s.savings_rate, dec("75"));
    let s = health_for(&snap, Month::May);
    assert_eq!(s.available_income, Decimal::ZERO);
}
