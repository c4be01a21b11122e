use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, anyhow};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{ETAG, HeaderName, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use serde::{Deserialize, Serialize};

const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    body: String,
    etag: Option<String>,
    last_modified: Option<String>,
    fetched_at: u64,
}

/// Conditional-GET cache for endpoint bodies, persisted as one JSON file.
pub struct HttpCache {
    path: PathBuf,
    state: Mutex<Option<CacheFile>>,
}

impl HttpCache {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: Mutex::new(None),
        }
    }

    /// GET `url`, revalidating any cached body with ETag / Last-Modified.
    pub fn fetch(&self, client: &Client, url: &str) -> Result<String> {
        let cached = self.with_file(|file| file.entries.get(url).cloned())?;

        let mut req = client.get(url);
        if let Some(entry) = cached.as_ref() {
            if let Some(etag) = entry.etag.as_ref() {
                req = req.header(IF_NONE_MATCH, etag);
            }
            if let Some(last_modified) = entry.last_modified.as_ref() {
                req = req.header(IF_MODIFIED_SINCE, last_modified);
            }
        }

        let resp = req.send().with_context(|| format!("request {url} failed"))?;
        let status = resp.status();
        if status == StatusCode::NOT_MODIFIED {
            let entry = cached.ok_or_else(|| anyhow!("received 304 without cache body"))?;
            tracing::debug!(url, "http cache hit");
            return Ok(entry.body);
        }

        let headers = resp.headers().clone();
        let body = resp.text().context("failed reading body")?;
        if !status.is_success() {
            return Err(anyhow!("http {status}: {body}"));
        }

        let header_str = |name: HeaderName| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        };
        let entry = CacheEntry {
            body: body.clone(),
            etag: header_str(ETAG),
            last_modified: header_str(LAST_MODIFIED),
            fetched_at: unix_now(),
        };
        if entry.etag.is_some() || entry.last_modified.is_some() {
            self.store(url, entry)?;
        }
        Ok(body)
    }

    fn store(&self, url: &str, entry: CacheEntry) -> Result<()> {
        let snapshot = self.with_file(|file| {
            file.version = CACHE_VERSION;
            file.entries.insert(url.to_string(), entry);
            file.clone()
        })?;
        if let Err(err) = save_cache_file(&self.path, &snapshot) {
            tracing::warn!(path = %self.path.display(), "failed to persist http cache: {err:#}");
        }
        Ok(())
    }

    fn with_file<T>(&self, action: impl FnOnce(&mut CacheFile) -> T) -> Result<T> {
        let mut guard = self
            .state
            .lock()
            .map_err(|_| anyhow!("http cache lock poisoned"))?;
        let file = guard.get_or_insert_with(|| load_cache_file(&self.path));
        Ok(action(file))
    }
}

fn load_cache_file(path: &Path) -> CacheFile {
    let Ok(raw) = fs::read_to_string(path) else {
        return CacheFile::default();
    };
    let cache = serde_json::from_str::<CacheFile>(&raw).unwrap_or_default();
    if cache.version != CACHE_VERSION {
        return CacheFile::default();
    }
    cache
}

fn save_cache_file(path: &Path, cache: &CacheFile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok();
    }
    let tmp = path.with_extension("json.tmp");
    let json = serde_json::to_string(cache).context("serialize http cache")?;
    fs::write(&tmp, json).context("write http cache")?;
    fs::rename(&tmp, path).context("swap http cache")?;
    Ok(())
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
