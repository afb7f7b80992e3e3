// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashlens::db;
use cashlens::ledger::LedgerError;
use cashlens::settings::{self, Settings, ENV_NOTION_TOKEN};
use cashlens::{cli, commands};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::str::FromStr;

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    conn
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn empty_store_loads_defaults() {
    let conn = setup();
    let s = Settings::load_with_env(&conn, no_env).unwrap();
    assert_eq!(s.goals.essential, Decimal::ZERO);
    assert_eq!(s.baseline.house_debt, Decimal::ZERO);
    assert_eq!(s.owner, "Usuario");
    assert!(matches!(
        s.notion_credentials(),
        Err(LedgerError::MissingSetting("notion.token"))
    ));
}

#[test]
fn set_values_flow_into_typed_settings() {
    let conn = setup();
    settings::set(&conn, "goal.essential", " 1500.50 ").unwrap();
    settings::set(&conn, "goal.investments", "2000").unwrap();
    settings::set(&conn, "baseline.land_debt", "80000").unwrap();
    settings::set(&conn, "owner.name", "Maria Silva").unwrap();
    settings::set(&conn, "notion.token", "secret_x").unwrap();
    settings::set(&conn, "notion.database_id", "db42").unwrap();

    let s = Settings::load_with_env(&conn, no_env).unwrap();
    assert_eq!(s.goals.essential, Decimal::from_str("1500.50").unwrap());
    assert_eq!(s.goals.investments, Decimal::from(2000));
    assert_eq!(s.baseline.land_debt, Decimal::from(80000));
    assert_eq!(s.owner, "Maria Silva");
    assert_eq!(s.notion_credentials().unwrap(), ("secret_x", "db42"));
}

#[test]
fn environment_overrides_stored_token() {
    let conn = setup();
    settings::set(&conn, "notion.token", "stored").unwrap();
    let s = Settings::load_with_env(&conn, |k| {
        (k == ENV_NOTION_TOKEN).then(|| "from-env".to_string())
    })
    .unwrap();
    assert_eq!(s.notion_token.as_deref(), Some("from-env"));
    assert!(serde_json::to_string(&s).unwrap().find("from-env").is_none());
}

#[test]
fn bad_keys_and_amounts_are_rejected() {
    let conn = setup();
    assert!(settings::set(&conn, "goal.fun", "10").is_err());
    assert!(settings::set(&conn, "goal.taxes", "lots").is_err());
    let stored: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(stored, 0);
}

#[test]
fn list_masks_the_token() {
    let conn = setup();
    settings::set(&conn, "notion.token", "secret_x").unwrap();
    settings::set(&conn, "goal.taxes", "300").unwrap();
    let rows = settings::list(&conn).unwrap();
    assert_eq!(rows.len(), settings::KEYS.len());
    let token = rows.iter().find(|(k, _, _)| k == "notion.token").unwrap();
    assert_eq!(token.1, "********");
    let taxes = rows.iter().find(|(k, _, _)| k == "goal.taxes").unwrap();
    assert_eq!(taxes.1, "300");
}

#[test]
fn config_command_sets_through_the_cli() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "cashlens",
        "config",
        "set",
        "baseline.fixed_income",
        "25000",
    ]);
    let (_, sub) = matches.subcommand().unwrap();
    commands::config::handle(&conn, sub).unwrap();
    let s = Settings::load_with_env(&conn, no_env).unwrap();
    assert_eq!(s.baseline.fixed_income, Decimal::from(25000));
}
