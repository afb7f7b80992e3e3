// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! User configuration kept in the `settings` table. Loaded once per run and
//! handed to the analytics as plain structs.

use crate::ledger::LedgerError;
use crate::models::{GoalConfig, NetWorthBaseline};
use crate::utils::{get_setting, parse_decimal, set_setting};
use anyhow::{anyhow, Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub const GOAL_ESSENTIAL: &str = "goal.essential";
pub const GOAL_NON_ESSENTIAL: &str = "goal.non_essential";
pub const GOAL_TAXES: &str = "goal.taxes";
pub const GOAL_INVESTMENTS: &str = "goal.investments";
pub const BASELINE_FIXED_INCOME: &str = "baseline.fixed_income";
pub const BASELINE_HOUSE_DEBT: &str = "baseline.house_debt";
pub const BASELINE_LAND_DEBT: &str = "baseline.land_debt";
pub const OWNER_NAME: &str = "owner.name";
pub const NOTION_TOKEN: &str = "notion.token";
pub const NOTION_DATABASE_ID: &str = "notion.database_id";

pub const ENV_NOTION_TOKEN: &str = "CASHLENS_NOTION_TOKEN";
pub const ENV_NOTION_DATABASE_ID: &str = "CASHLENS_NOTION_DATABASE_ID";

const DEFAULT_OWNER: &str = "Usuario";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Amount,
    Text,
    Secret,
}

/// Every key `config set` accepts, with a short description.
pub const KEYS: &[(&str, &str)] = &[
    (GOAL_ESSENTIAL, "Monthly ceiling for essential expenses"),
    (GOAL_NON_ESSENTIAL, "Monthly ceiling for non-essential expenses"),
    (GOAL_TAXES, "Monthly ceiling for taxes and fees"),
    (GOAL_INVESTMENTS, "Monthly investment target"),
    (BASELINE_FIXED_INCOME, "Fixed-income balance at the start of the cycle"),
    (BASELINE_HOUSE_DEBT, "Outstanding house debt at the start of the cycle"),
    (BASELINE_LAND_DEBT, "Outstanding land debt at the start of the cycle"),
    (OWNER_NAME, "Your name as it appears in payees (excluded from rankings)"),
    (NOTION_TOKEN, "Notion integration token"),
    (NOTION_DATABASE_ID, "Notion database holding the ledger"),
];

fn kind_of(key: &str) -> Option<Kind> {
    match key {
        OWNER_NAME | NOTION_DATABASE_ID => Some(Kind::Text),
        NOTION_TOKEN => Some(Kind::Secret),
        k if KEYS.iter().any(|(known, _)| *known == k) => Some(Kind::Amount),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub goals: GoalConfig,
    pub baseline: NetWorthBaseline,
    pub owner: String,
    #[serde(skip)]
    pub notion_token: Option<String>,
    pub notion_database_id: Option<String>,
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        Self::load_with_env(conn, |k| std::env::var(k).ok())
    }

    /// Same as [`Settings::load`] with an injectable environment lookup.
    pub fn load_with_env(conn: &Connection, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let amount = |key: &str| -> Result<Decimal> {
            match get_setting(conn, key)? {
                Some(v) => parse_decimal(&v).with_context(|| format!("Setting '{}'", key)),
                None => Ok(Decimal::ZERO),
            }
        };
        let text = |key: &str, env_key: Option<&str>| -> Result<Option<String>> {
            let from_env = env_key.and_then(|k| env(k)).filter(|v| !v.trim().is_empty());
            match from_env {
                Some(v) => Ok(Some(v)),
                None => get_setting(conn, key),
            }
        };

        Ok(Self {
            goals: GoalConfig {
                essential: amount(GOAL_ESSENTIAL)?,
                non_essential: amount(GOAL_NON_ESSENTIAL)?,
                taxes: amount(GOAL_TAXES)?,
                investments: amount(GOAL_INVESTMENTS)?,
            },
            baseline: NetWorthBaseline {
                fixed_income: amount(BASELINE_FIXED_INCOME)?,
                house_debt: amount(BASELINE_HOUSE_DEBT)?,
                land_debt: amount(BASELINE_LAND_DEBT)?,
            },
            owner: text(OWNER_NAME, None)?.unwrap_or_else(|| DEFAULT_OWNER.to_string()),
            notion_token: text(NOTION_TOKEN, Some(ENV_NOTION_TOKEN))?,
            notion_database_id: text(NOTION_DATABASE_ID, Some(ENV_NOTION_DATABASE_ID))?,
        })
    }

    /// Credentials for the remote ledger, or the first missing one.
    pub fn notion_credentials(&self) -> Result<(&str, &str), LedgerError> {
        let token = self
            .notion_token
            .as_deref()
            .ok_or(LedgerError::MissingSetting(NOTION_TOKEN))?;
        let db = self
            .notion_database_id
            .as_deref()
            .ok_or(LedgerError::MissingSetting(NOTION_DATABASE_ID))?;
        Ok((token, db))
    }
}

/// Validates and stores one setting.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    let key = key.trim();
    let value = value.trim();
    let kind = kind_of(key).ok_or_else(|| anyhow!("Unknown setting '{}'", key))?;
    if kind == Kind::Amount {
        let d = parse_decimal(value).with_context(|| format!("Setting '{}'", key))?;
        return set_setting(conn, key, &d.to_string());
    }
    set_setting(conn, key, value)
}

/// Current stored value of every key, secrets masked.
pub fn list(conn: &Connection) -> Result<Vec<(String, String, String)>> {
    let mut out = Vec::with_capacity(KEYS.len());
    for (key, help) in KEYS {
        let value = match (get_setting(conn, key)?, kind_of(key)) {
            (Some(_), Some(Kind::Secret)) => "********".to_string(),
            (Some(v), _) => v,
            (None, _) => String::new(),
        };
        out.push((key.to_string(), value, help.to_string()));
    }
    Ok(out)
}
