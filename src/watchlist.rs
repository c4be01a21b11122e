use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, params};
use serde::Serialize;
use serde_json::Value;

use crate::coerce;
use crate::record::RawRecord;
use crate::schema::Position;

/// Where watch-listed players come from.
pub trait WatchList {
    /// Items for one position, each carrying that position's join-key field.
    fn items_by_category(&self, position: Position) -> Result<Vec<RawRecord>>;
}

/// Trimmed join keys in watch-list order. Items without a usable key are skipped.
pub fn watched_keys(items: &[RawRecord], join_key_field: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get(join_key_field).and_then(coerce::to_key_text))
        .filter(|key| !key.is_empty())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchEntry {
    pub position: Position,
    pub join_key: String,
    pub note: Option<String>,
    pub added_at: String,
}

pub struct SqliteWatchList {
    conn: Connection,
}

impl SqliteWatchList {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)
            .with_context(|| format!("open watch-list db {}", path.display()))?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory watch-list db")?;
        init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Returns false when the key was already on the list.
    pub fn add(&self, position: Position, join_key: &str, note: Option<&str>) -> Result<bool> {
        let key = join_key.trim();
        anyhow::ensure!(!key.is_empty(), "join key must not be blank");
        let added_at = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        let changed = self
            .conn
            .execute(
                "INSERT OR IGNORE INTO watch_list (category, join_key, note, added_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![position.slug(), key, note, added_at],
            )
            .context("insert watch-list entry")?;
        Ok(changed > 0)
    }

    pub fn remove(&self, position: Position, join_key: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute(
                "DELETE FROM watch_list WHERE category = ?1 AND join_key = ?2",
                params![position.slug(), join_key.trim()],
            )
            .context("delete watch-list entry")?;
        Ok(changed > 0)
    }

    pub fn list(&self, position: Position) -> Result<Vec<WatchEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT join_key, note, added_at FROM watch_list
                 WHERE category = ?1 ORDER BY rowid",
            )
            .context("prepare watch-list query")?;
        let rows = stmt
            .query_map(params![position.slug()], |row| {
                Ok(WatchEntry {
                    position,
                    join_key: row.get(0)?,
                    note: row.get(1)?,
                    added_at: row.get(2)?,
                })
            })
            .context("query watch-list")?;
        let mut out = Vec::new();
        for row in rows {
            out.push(row.context("read watch-list row")?);
        }
        Ok(out)
    }
}

impl WatchList for SqliteWatchList {
    fn items_by_category(&self, position: Position) -> Result<Vec<RawRecord>> {
        let field = position.schema().join_key_field;
        let items = self
            .list(position)?
            .into_iter()
            .map(|entry| {
                let mut item = RawRecord::new();
                item.insert(field.to_string(), Value::String(entry.join_key));
                if let Some(note) = entry.note {
                    item.insert("note".to_string(), Value::String(note));
                }
                item.insert("added_at".to_string(), Value::String(entry.added_at));
                item
            })
            .collect();
        Ok(items)
    }
}

fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS watch_list (
            category TEXT NOT NULL,
            join_key TEXT NOT NULL,
            note TEXT NULL,
            added_at TEXT NOT NULL,
            PRIMARY KEY (category, join_key)
        );
        CREATE INDEX IF NOT EXISTS idx_watch_list_category ON watch_list(category);
        "#,
    )
    .context("init watch-list schema")?;
    Ok(())
}
