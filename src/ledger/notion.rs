// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Ledger kept as a Notion database. Pages are read through the paginated
//! `databases/{id}/query` endpoint and flattened into [`RawRecord`]s.

use super::{LedgerError, LedgerSource};
use crate::models::RawRecord;
use reqwest::blocking::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace};

pub const NOTION_API: &str = "https://api.notion.com/v1";
pub const NOTION_VERSION: &str = "2022-06-28";

const PROP_DATE: &str = "Data";
const PROP_INSTITUTION: &str = "Banco";
const PROP_TITLE: &str = "Transação";
const PROP_AMOUNT: &str = "Valor";
const PROP_EXPENSE_TYPE: &str = "Tipo de despesa";
const PROP_PAYMENT_MONTH: &str = "Mês de pagamento";
const PROP_PAYEE: &str = "Favorecido";
const PROP_DESCRIPTION: &str = "Descrição";
const PROP_INSTALLMENT: &str = "Parcela";

pub struct NotionSource {
    client: Client,
    base_url: String,
    token: String,
    database_id: String,
    key: String,
}

impl NotionSource {
    pub fn new(client: Client, token: impl Into<String>, database_id: impl Into<String>) -> Self {
        let database_id = database_id.into();
        Self {
            client,
            base_url: NOTION_API.to_string(),
            token: token.into(),
            key: format!("notion:{}", database_id),
            database_id,
        }
    }

    /// Points the client at another host, e.g. a local stub.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn query_url(&self) -> String {
        format!("{}/databases/{}/query", self.base_url, self.database_id)
    }
}

#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

impl LedgerSource for NotionSource {
    fn name(&self) -> &str {
        &self.key
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, LedgerError> {
        let url = self.query_url();
        let mut records = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let body = match &cursor {
                Some(c) => json!({ "start_cursor": c }),
                None => json!({}),
            };
            trace!(%url, cursor = ?cursor, "querying ledger page");
            let resp = self
                .client
                .post(&url)
                .bearer_auth(&self.token)
                .header("Notion-Version", NOTION_VERSION)
                .json(&body)
                .send()?;
            let status = resp.status();
            if !status.is_success() {
                let body = resp
                    .text()
                    .unwrap_or_else(|_| "Unable to read response body".to_string());
                return Err(LedgerError::Remote {
                    status: status.as_u16(),
                    body,
                });
            }
            let page: QueryPage = resp.json()?;
            debug!(count = page.results.len(), has_more = page.has_more, "ledger page");
            records.extend(page.results.iter().map(record_from_page));
            match (page.has_more, page.next_cursor) {
                (true, Some(next)) => cursor = Some(next),
                _ => break,
            }
        }
        Ok(records)
    }
}

/// Flattens one Notion page. Properties that are missing or shaped
/// unexpectedly come back as `None`.
pub fn record_from_page(page: &Value) -> RawRecord {
    let props = &page["properties"];
    RawRecord {
        date: formula(&props[PROP_DATE]),
        institution: select(&props[PROP_INSTITUTION]),
        title: first_text(&props[PROP_TITLE], "title"),
        amount: number(&props[PROP_AMOUNT]),
        expense_type: select(&props[PROP_EXPENSE_TYPE]),
        payment_month: select(&props[PROP_PAYMENT_MONTH]),
        payee: first_text(&props[PROP_PAYEE], "rich_text"),
        description: first_text(&props[PROP_DESCRIPTION], "rich_text"),
        installment: first_text(&props[PROP_INSTALLMENT], "rich_text"),
    }
}

fn owned(v: &Value) -> Option<String> {
    v.as_str().map(str::to_string)
}

fn select(prop: &Value) -> Option<String> {
    owned(&prop["select"]["name"])
}

fn formula(prop: &Value) -> Option<String> {
    owned(&prop["formula"]["string"])
}

fn first_text(prop: &Value, kind: &str) -> Option<String> {
    owned(&prop[kind][0]["plain_text"])
}

fn number(prop: &Value) -> Option<Decimal> {
    let Value::Number(n) = &prop["number"] else {
        return None;
    };
    let s = n.to_string();
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::from_scientific(&s).ok())
}
