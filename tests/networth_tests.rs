// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashlens::analytics::networth::{
    fixed_income_series, impact, liability_effort, net_worth, report, HOUSE, LAND,
};
use cashlens::categories::CategoryMap;
use cashlens::models::{Month, NetWorthBaseline, Snapshot, Transaction};
use rust_decimal::Decimal;

fn tx(category: &str, amount: i64, month: Option<Month>) -> Transaction {
    Transaction {
        date: None,
        institution: "XP".into(),
        label: category.into(),
        amount: Decimal::from(amount),
        category: category.into(),
        payment_month: month,
        payee: "N/A".into(),
        description: "N/A".into(),
        installment_marker: None,
        macro_group: CategoryMap::standard().classify(category),
    }
}

fn n(v: i64) -> Decimal {
    Decimal::from(v)
}

#[test]
fn impact_follows_the_direction_of_money() {
    // yield always grows the balance, whatever its recorded sign
    assert_eq!(impact(&tx("Rendimento", 50, None)), n(50));
    assert_eq!(impact(&tx("Rendimento", -50, None)), n(50));
    // contribution grows it, redemption shrinks it
    assert_eq!(impact(&tx("Renda fixa", -800, None)), n(800));
    assert_eq!(impact(&tx("Renda fixa", 300, None)), n(-300));
    assert_eq!(impact(&tx("Renda fixa", 0, None)), Decimal::ZERO);
    assert_eq!(impact(&tx("Supermercado", -100, None)), Decimal::ZERO);
}

#[test]
fn balance_accumulates_month_by_month() {
    let txs = vec![
        tx("Renda fixa", -800, Some(Month::February)),
        tx("Rendimento", 50, Some(Month::January)),
        tx("Renda fixa", 300, Some(Month::March)),
        tx("Supermercado", -400, Some(Month::March)),
    ];
    let s = fixed_income_series(&txs, n(1000));
    let balances: Vec<(Month, Decimal)> = s.points.iter().map(|p| (p.month, p.balance)).collect();
    assert_eq!(
        balances,
        vec![
            (Month::January, n(1050)),
            (Month::February, n(1850)),
            (Month::March, n(1550)),
        ]
    );
    assert_eq!(s.year_impact, n(550));
    assert_eq!(s.current, n(1550));
}

#[test]
fn unbucketed_rows_count_towards_the_year_only() {
    let txs = vec![
        tx("Rendimento", 20, None),
        tx("Rendimento", 10, Some(Month::May)),
    ];
    let s = fixed_income_series(&txs, Decimal::ZERO);
    assert_eq!(s.points.len(), 1);
    assert_eq!(s.points[0].balance, n(10));
    assert_eq!(s.current, n(30));
}

#[test]
fn debt_effort_counts_outflows_only() {
    let txs = vec![
        tx(HOUSE, -500, Some(Month::January)),
        tx(HOUSE, -500, Some(Month::February)),
        tx(HOUSE, 200, Some(Month::February)),
        tx(LAND, -100, Some(Month::January)),
    ];
    let house = liability_effort(&txs, HOUSE, n(10_000));
    assert_eq!(house.total_paid, n(1000));
    assert_eq!(house.estimated_remaining, n(9000));
    let cumulative: Vec<Decimal> = house.points.iter().map(|p| p.cumulative_paid).collect();
    assert_eq!(cumulative, vec![n(500), n(1000)]);
    assert_eq!(house.points[1].estimated_remaining, n(9000));

    let land = liability_effort(&txs, LAND, n(50));
    assert_eq!(land.estimated_remaining, n(-50));
}

#[test]
fn net_worth_subtracts_baseline_debts() {
    let baseline = NetWorthBaseline {
        fixed_income: n(1000),
        house_debt: n(200),
        land_debt: n(100),
    };
    assert_eq!(net_worth(n(1550), &baseline), n(1250));

    let snap = Snapshot::new(vec![
        tx("Rendimento", 50, Some(Month::January)),
        tx("Renda fixa", -800, Some(Month::February)),
        tx(HOUSE, -150, Some(Month::February)),
    ]);
    let r = report(&snap, &baseline);
    assert_eq!(r.fixed_income.current, n(1850));
    assert_eq!(r.net_worth, n(1550));
    assert_eq!(r.house.total_paid, n(150));
    assert_eq!(r.land.total_paid, Decimal::ZERO);
    // the baseline itself is never touched
    assert_eq!(baseline.house_debt, n(200));
}
