// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod categories;
pub mod config;
pub mod costs;
pub mod exporter;
pub mod goals;
pub mod health;
pub mod history;
pub mod networth;
pub mod projections;
pub mod sync;

use crate::categories::CategoryMap;
use crate::ledger::{CachedLedger, CsvSource, LedgerSource, NotionSource, SqliteCache};
use crate::models::{Month, RawRecord, Snapshot};
use crate::normalize::Normalizer;
use crate::settings::Settings;
use crate::utils::http_client;
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use std::path::PathBuf;

pub const NO_DATA: &str = "No data available.";

/// Everything a report needs for one run: settings, the category table and
/// a way to get the ledger.
pub struct Session<'c> {
    conn: &'c Connection,
    pub settings: Settings,
    pub categories: CategoryMap,
    pub today: NaiveDate,
    csv: Option<PathBuf>,
    refresh: bool,
}

impl<'c> Session<'c> {
    pub fn new(conn: &'c Connection, settings: Settings) -> Self {
        Self {
            conn,
            settings,
            categories: CategoryMap::standard(),
            today: chrono::Local::now().date_naive(),
            csv: None,
            refresh: false,
        }
    }

    /// Builds a session from the global command-line flags.
    pub fn from_args(conn: &'c Connection, m: &clap::ArgMatches) -> Result<Self> {
        let settings = Settings::load(conn)?;
        let mut s = Self::new(conn, settings).with_refresh(m.get_flag("refresh"));
        if let Some(path) = m.get_one::<String>("csv") {
            s = s.with_csv(path.trim());
        }
        Ok(s)
    }

    pub fn with_csv(mut self, path: impl Into<PathBuf>) -> Self {
        self.csv = Some(path.into());
        self
    }

    pub fn with_refresh(mut self, refresh: bool) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn conn(&self) -> &Connection {
        self.conn
    }

    fn source(&self) -> Result<Box<dyn LedgerSource>> {
        if let Some(path) = &self.csv {
            return Ok(Box::new(CsvSource::new(path.clone())));
        }
        let (token, db) = self.settings.notion_credentials()?;
        Ok(Box::new(NotionSource::new(http_client()?, token, db)))
    }

    /// Raw records, through the snapshot cache for remote sources. A CSV
    /// file is always read directly.
    pub fn records(&self, force: bool) -> Result<Vec<RawRecord>> {
        let source = self.source()?;
        if self.csv.is_some() {
            return source.fetch().context("Failed to read ledger");
        }
        let cache = SqliteCache::new(self.conn);
        let ledger = CachedLedger::new(source.as_ref(), &cache);
        let records = if force || self.refresh {
            ledger.refresh(Utc::now())
        } else {
            ledger.load(Utc::now())
        };
        records.context("Failed to load ledger")
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        let records = self.records(false)?;
        Ok(Normalizer::new(&self.categories).snapshot(&records))
    }
}

/// Parsed `--month`, if given.
pub(crate) fn month_arg(sub: &clap::ArgMatches) -> Result<Option<Month>> {
    sub.get_one::<String>("month")
        .map(|raw| Month::parse_arg(raw).ok_or_else(|| anyhow!("Invalid month '{}'", raw.trim())))
        .transpose()
}

/// `--month` if given, otherwise `fallback` applied to the months with data.
pub(crate) fn resolve_month(
    sub: &clap::ArgMatches,
    available: &[Month],
    fallback: impl FnOnce(&[Month]) -> Option<Month>,
) -> Result<Option<Month>> {
    Ok(month_arg(sub)?.or_else(|| fallback(available)))
}
