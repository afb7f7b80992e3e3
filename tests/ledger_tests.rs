// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use cashlens::db;
use cashlens::ledger::{
    record_from_page, CachedLedger, CsvSource, LedgerError, LedgerSource, MemoryCache,
    NotionSource, SnapshotCache, SqliteCache,
};
use cashlens::models::RawRecord;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;
use std::cell::Cell;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::str::FromStr;
use std::thread;
use tempfile::tempdir;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn record(title: &str) -> RawRecord {
    RawRecord {
        title: Some(title.into()),
        amount: Some(Decimal::from(10)),
        ..Default::default()
    }
}

fn page(title: &str, amount: serde_json::Value) -> serde_json::Value {
    json!({
        "object": "page",
        "properties": {
            "Data": { "type": "formula", "formula": { "type": "string", "string": "05/03/2026" } },
            "Banco": { "type": "select", "select": { "name": "Nubank" } },
            "Transação": { "type": "title", "title": [ { "plain_text": title } ] },
            "Valor": { "type": "number", "number": amount },
            "Tipo de despesa": { "type": "select", "select": { "name": "Supermercado" } },
            "Mês de pagamento": { "type": "select", "select": { "name": "Março" } },
            "Favorecido": { "type": "rich_text", "rich_text": [ { "plain_text": "Mercado Bom" } ] },
            "Descrição": { "type": "rich_text", "rich_text": [] },
            "Parcela": { "type": "rich_text", "rich_text": [ { "plain_text": "1/3" } ] }
        }
    })
}

#[test]
fn notion_pages_flatten_into_raw_records() {
    let r = record_from_page(&page("Compra do mês", json!(123.45)));
    assert_eq!(r.date.as_deref(), Some("05/03/2026"));
    assert_eq!(r.institution.as_deref(), Some("Nubank"));
    assert_eq!(r.title.as_deref(), Some("Compra do mês"));
    assert_eq!(r.amount, Some(Decimal::from_str("123.45").unwrap()));
    assert_eq!(r.expense_type.as_deref(), Some("Supermercado"));
    assert_eq!(r.payment_month.as_deref(), Some("Março"));
    assert_eq!(r.payee.as_deref(), Some("Mercado Bom"));
    assert_eq!(r.description, None);
    assert_eq!(r.installment.as_deref(), Some("1/3"));
}

#[test]
fn odd_notion_pages_yield_empty_fields() {
    let r = record_from_page(&page("Sem valor", serde_json::Value::Null));
    assert_eq!(r.amount, None);

    let bare = record_from_page(&json!({ "properties": { "Banco": { "select": null } } }));
    assert_eq!(bare, RawRecord::default());
    assert_eq!(record_from_page(&json!({})), RawRecord::default());
}

/// Serves `responses` in order, one connection each, and returns the request
/// bodies it saw.
fn stub_server(responses: Vec<(u16, String)>) -> (String, thread::JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let mut bodies = Vec::new();
        for (status, payload) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut len = 0usize;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if line == "\r\n" || line.is_empty() {
                    break;
                }
                let lower = line.to_ascii_lowercase();
                if let Some(v) = lower.strip_prefix("content-length:") {
                    len = v.trim().parse().unwrap();
                }
            }
            let mut body = vec![0u8; len];
            reader.read_exact(&mut body).unwrap();
            bodies.push(String::from_utf8(body).unwrap());
            let reply = format!(
                "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                payload.len(),
                payload
            );
            stream.write_all(reply.as_bytes()).unwrap();
        }
        bodies
    });
    (url, handle)
}

#[test]
fn notion_source_follows_pagination() {
    let first = json!({ "results": [page("A", json!(10))], "has_more": true, "next_cursor": "abc" });
    let second = json!({ "results": [page("B", json!(20)), page("C", json!(30))], "has_more": false, "next_cursor": null });
    let (url, server) = stub_server(vec![(200, first.to_string()), (200, second.to_string())]);

    let source = NotionSource::new(reqwest::blocking::Client::new(), "secret", "db1")
        .with_base_url(url);
    assert_eq!(source.name(), "notion:db1");
    let records = source.fetch().unwrap();
    let titles: Vec<&str> = records.iter().filter_map(|r| r.title.as_deref()).collect();
    assert_eq!(titles, vec!["A", "B", "C"]);

    let bodies = server.join().unwrap();
    assert_eq!(bodies.len(), 2);
    let second_body: serde_json::Value = serde_json::from_str(&bodies[1]).unwrap();
    assert_eq!(second_body["start_cursor"], "abc");
}

#[test]
fn notion_errors_keep_status_and_body() {
    let (url, server) = stub_server(vec![(401, r#"{"message":"unauthorized"}"#.to_string())]);
    let source = NotionSource::new(reqwest::blocking::Client::new(), "bad", "db1")
        .with_base_url(url);
    match source.fetch() {
        Err(LedgerError::Remote { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("unauthorized"));
        }
        other => panic!("expected remote error, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn csv_source_reads_exports() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ledger.csv");
    std::fs::write(
        &path,
        "date,institution,title,amount,expense_type,payment_month,payee,description,installment\n\
         05/03/2026,Nubank,Mercado,120.50,Supermercado,Março,Mercado Bom,,\n\
         01/03/2026, Inter ,Salário,-5000,Remuneração,Março,,Empresa,\n\
         ,,,,,,,,\n",
    )
    .unwrap();

    let source = CsvSource::new(&path);
    assert!(source.name().starts_with("csv:"));
    let records = source.fetch().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].amount, Some(Decimal::from_str("120.50").unwrap()));
    assert_eq!(records[0].description, None);
    assert_eq!(records[1].institution.as_deref(), Some("Inter"));
    assert_eq!(records[1].amount, Some(Decimal::from(-5000)));
    assert_eq!(records[2], RawRecord::default());
}

#[test]
fn missing_csv_is_a_ledger_error() {
    let dir = tempdir().unwrap();
    let err = CsvSource::new(dir.path().join("nope.csv")).fetch().unwrap_err();
    assert!(matches!(err, LedgerError::Csv { .. }));
}

#[test]
fn memory_cache_expires_after_max_age() {
    let cache = MemoryCache::new();
    let ttl = Duration::minutes(10);
    assert!(cache.load("k", ttl, t0()).unwrap().is_none());

    cache.store("k", &[record("a")], t0()).unwrap();
    let hit = cache.load("k", ttl, t0() + Duration::minutes(5)).unwrap();
    assert_eq!(hit, Some(vec![record("a")]));
    assert!(cache.load("k", ttl, t0() + Duration::minutes(10)).unwrap().is_none());
    assert!(cache.load("other", ttl, t0()).unwrap().is_none());
}

#[test]
fn sqlite_cache_round_trips_and_clears() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let cache = SqliteCache::new(&conn);
    let ttl = Duration::seconds(600);

    cache.store("notion:db1", &[record("a"), record("b")], t0()).unwrap();
    let hit = cache.load("notion:db1", ttl, t0() + Duration::seconds(30)).unwrap();
    assert_eq!(hit.map(|r| r.len()), Some(2));

    // overwrite keeps one row per key
    cache.store("notion:db1", &[record("c")], t0() + Duration::minutes(1)).unwrap();
    let hit = cache.load("notion:db1", ttl, t0() + Duration::minutes(2)).unwrap();
    assert_eq!(hit, Some(vec![record("c")]));
    assert!(cache.load("notion:db1", ttl, t0() + Duration::hours(1)).unwrap().is_none());

    assert_eq!(cache.clear().unwrap(), 1);
    assert!(cache.load("notion:db1", ttl, t0()).unwrap().is_none());
}

struct CountingSource {
    calls: Cell<usize>,
}

impl LedgerSource for CountingSource {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, LedgerError> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![record(&format!("fetch {}", self.calls.get()))])
    }
}

#[test]
fn cached_ledger_fetches_once_per_ttl() {
    let source = CountingSource { calls: Cell::new(0) };
    let cache = MemoryCache::new();
    let ledger = CachedLedger::new(&source, &cache);

    let first = ledger.load(t0()).unwrap();
    let again = ledger.load(t0() + Duration::minutes(9)).unwrap();
    assert_eq!(source.calls.get(), 1);
    assert_eq!(first, again);

    let stale = ledger.load(t0() + Duration::minutes(11)).unwrap();
    assert_eq!(source.calls.get(), 2);
    assert_ne!(first, stale);

    ledger.refresh(t0() + Duration::minutes(12)).unwrap();
    assert_eq!(source.calls.get(), 3);

    let short = CachedLedger::new(&source, &cache).with_max_age(Duration::zero());
    short.load(t0() + Duration::minutes(12)).unwrap();
    assert_eq!(source.calls.get(), 4);
}
