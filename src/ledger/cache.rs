// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{LedgerError, LedgerSource};
use crate::models::RawRecord;
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, info};

/// Ten minutes, matching how often the remote ledger is worth re-reading.
pub const DEFAULT_TTL_SECS: i64 = 600;

/// Time-bounded storage for fetched ledgers. Held by the caller; the
/// analytics never see it.
pub trait SnapshotCache {
    /// Records stored under `key` no older than `max_age`, if any.
    fn load(
        &self,
        key: &str,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<RawRecord>>, LedgerError>;

    fn store(&self, key: &str, records: &[RawRecord], now: DateTime<Utc>)
    -> Result<(), LedgerError>;
}

fn is_fresh(fetched_at: DateTime<Utc>, max_age: Duration, now: DateTime<Utc>) -> bool {
    now.signed_duration_since(fetched_at) < max_age
}

/// Cache persisted in the `snapshots` table.
pub struct SqliteCache<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteCache<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn clear(&self) -> Result<usize, LedgerError> {
        Ok(self.conn.execute("DELETE FROM snapshots", [])?)
    }
}

impl SnapshotCache for SqliteCache<'_> {
    fn load(
        &self,
        key: &str,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<RawRecord>>, LedgerError> {
        let row: Option<(DateTime<Utc>, String)> = self
            .conn
            .query_row(
                "SELECT fetched_at, payload FROM snapshots WHERE key=?1",
                params![key],
                |r| Ok((r.get(0)?, r.get(1)?)),
            )
            .optional()?;
        match row {
            Some((fetched_at, payload)) if is_fresh(fetched_at, max_age, now) => {
                Ok(Some(serde_json::from_str(&payload)?))
            }
            _ => Ok(None),
        }
    }

    fn store(
        &self,
        key: &str,
        records: &[RawRecord],
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let payload = serde_json::to_string(records)?;
        self.conn.execute(
            "INSERT INTO snapshots(key, fetched_at, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET fetched_at=excluded.fetched_at, payload=excluded.payload",
            params![key, now, payload],
        )?;
        Ok(())
    }
}

/// Process-local cache, mostly for tests and one-shot runs.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (DateTime<Utc>, Vec<RawRecord>)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotCache for MemoryCache {
    fn load(
        &self,
        key: &str,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<Option<Vec<RawRecord>>, LedgerError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries
            .get(key)
            .filter(|(at, _)| is_fresh(*at, max_age, now))
            .map(|(_, records)| records.clone()))
    }

    fn store(
        &self,
        key: &str,
        records: &[RawRecord],
        now: DateTime<Utc>,
    ) -> Result<(), LedgerError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (now, records.to_vec()));
        Ok(())
    }
}

/// A source read through a cache.
pub struct CachedLedger<'a> {
    source: &'a dyn LedgerSource,
    cache: &'a dyn SnapshotCache,
    max_age: Duration,
}

impl<'a> CachedLedger<'a> {
    pub fn new(source: &'a dyn LedgerSource, cache: &'a dyn SnapshotCache) -> Self {
        Self {
            source,
            cache,
            max_age: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Cached records when fresh, otherwise a new fetch.
    pub fn load(&self, now: DateTime<Utc>) -> Result<Vec<RawRecord>, LedgerError> {
        if let Some(records) = self.cache.load(self.source.name(), self.max_age, now)? {
            debug!(source = self.source.name(), count = records.len(), "snapshot cache hit");
            return Ok(records);
        }
        self.refresh(now)
    }

    /// Always fetches and overwrites the cached copy.
    pub fn refresh(&self, now: DateTime<Utc>) -> Result<Vec<RawRecord>, LedgerError> {
        let records = self.source.fetch()?;
        info!(source = self.source.name(), count = records.len(), "fetched ledger");
        self.cache.store(self.source.name(), &records, now)?;
        Ok(records)
    }
}
