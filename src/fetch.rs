use anyhow::{Context, Result, anyhow, bail};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{AppConfig, app_cache_dir};
use crate::http_cache::HttpCache;
use crate::http_client::http_client;
use crate::record::RawRecord;
use crate::schema::Position;

/// The two record sets a comparison view joins.
pub trait RecordSource: Sync {
    fn fetch_statistics(&self, position: Position) -> Result<Vec<RawRecord>>;
    fn fetch_graphic(&self, position: Position) -> Result<Vec<RawRecord>>;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Parse `{ "data": [...] }` or `{ "success": true, "data": [...] }`.
/// Rows that are not JSON objects are skipped.
pub fn parse_records_json(raw: &str) -> Result<Vec<RawRecord>> {
    let envelope: Envelope = serde_json::from_str(raw).context("invalid records json")?;
    if envelope.success == Some(false) {
        let reason = envelope
            .message
            .or(envelope.error)
            .unwrap_or_else(|| "no reason given".to_string());
        bail!("endpoint reported failure: {reason}");
    }
    let rows = match envelope.data {
        Some(Value::Array(rows)) => rows,
        Some(other) => bail!("expected data array, got {}", json_kind(&other)),
        None => bail!("response has no data field"),
    };
    let total = rows.len();
    let records: Vec<RawRecord> = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();
    if records.len() != total {
        tracing::warn!(skipped = total - records.len(), "non-object rows in response");
    }
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// HTTP data provider for the statistics and graphic endpoints.
pub struct ApiClient {
    base_url: String,
    client: &'static Client,
    cache: Option<HttpCache>,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = http_client(config.http_timeout_secs)?;
        let cache = if config.http_cache {
            app_cache_dir().map(|dir| HttpCache::new(dir.join("http_cache.json")))
        } else {
            None
        };
        Ok(Self {
            base_url: config.api_base.clone(),
            client,
            cache,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get_records(&self, path: &str) -> Result<Vec<RawRecord>> {
        let url = self.url(path);
        tracing::debug!(url = %url, "fetching records");
        let body = match self.cache.as_ref() {
            Some(cache) => cache.fetch(self.client, &url)?,
            None => {
                let resp = self
                    .client
                    .get(&url)
                    .send()
                    .with_context(|| format!("request {url} failed"))?;
                let status = resp.status();
                let body = resp.text().context("failed reading body")?;
                if !status.is_success() {
                    return Err(anyhow!("http {status}: {body}"));
                }
                body
            }
        };
        parse_records_json(&body).with_context(|| format!("parse {url}"))
    }
}

impl RecordSource for ApiClient {
    fn fetch_statistics(&self, position: Position) -> Result<Vec<RawRecord>> {
        self.get_records(position.schema().statistics_path)
    }

    fn fetch_graphic(&self, position: Position) -> Result<Vec<RawRecord>> {
        self.get_records(position.schema().graphic_path)
    }
}
