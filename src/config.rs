use std::env;
use std::path::PathBuf;

use crate::selection::DEFAULT_SELECTION_CAP;

const APP_DIR: &str = "scout_compare";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base: String,
    pub http_timeout_secs: u64,
    pub selection_cap: usize,
    pub db_path: Option<PathBuf>,
    pub http_cache: bool,
    pub log_filter: String,
}

impl AppConfig {
    /// Reads `.env.local` / `.env` first; real environment variables win.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_current_env()
    }

    pub fn from_current_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("SCOUT_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "http://localhost:3000".to_string());
        let http_timeout_secs = lookup("SCOUT_HTTP_TIMEOUT_SECS")
            .and_then(|val| val.trim().parse::<u64>().ok())
            .unwrap_or(10)
            .clamp(1, 120);
        let selection_cap = lookup("SCOUT_SELECTION_CAP")
            .and_then(|val| val.trim().parse::<usize>().ok())
            .unwrap_or(DEFAULT_SELECTION_CAP)
            .clamp(1, 12);
        let db_path = lookup("SCOUT_DB_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .or_else(|| app_cache_dir().map(|dir| dir.join("watch_list.sqlite")));
        let http_cache = lookup("SCOUT_HTTP_CACHE")
            .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(true);
        let log_filter = lookup("SCOUT_LOG")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "info".to_string());

        Self {
            api_base,
            http_timeout_secs,
            selection_cap,
            db_path,
            http_cache,
            log_filter,
        }
    }
}

pub fn app_cache_dir() -> Option<PathBuf> {
    if let Ok(base) = env::var("XDG_CACHE_HOME") {
        if !base.trim().is_empty() {
            return Some(PathBuf::from(base).join(APP_DIR));
        }
    }
    let home = env::var("HOME").ok()?;
    if home.trim().is_empty() {
        return None;
    }
    Some(PathBuf::from(home).join(".cache").join(APP_DIR))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::AppConfig;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.api_base, "http://localhost:3000");
        assert_eq!(cfg.http_timeout_secs, 10);
        assert_eq!(cfg.selection_cap, 6);
        assert!(cfg.http_cache);
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn values_are_trimmed_and_clamped() {
        let cfg = config(&[
            ("SCOUT_API_BASE", " https://scout.example/ "),
            ("SCOUT_HTTP_TIMEOUT_SECS", "900"),
            ("SCOUT_SELECTION_CAP", "0"),
            ("SCOUT_DB_PATH", "/tmp/watch.sqlite"),
            ("SCOUT_HTTP_CACHE", "Off"),
            ("SCOUT_LOG", "scout_compare=debug"),
        ]);
        assert_eq!(cfg.api_base, "https://scout.example");
        assert_eq!(cfg.http_timeout_secs, 120);
        assert_eq!(cfg.selection_cap, 1);
        assert_eq!(cfg.db_path, Some(PathBuf::from("/tmp/watch.sqlite")));
        assert!(!cfg.http_cache);
        assert_eq!(cfg.log_filter, "scout_compare=debug");
    }

    #[test]
    fn unparsable_numbers_fall_back() {
        let cfg = config(&[("SCOUT_HTTP_TIMEOUT_SECS", "soon"), ("SCOUT_SELECTION_CAP", "-3")]);
        assert_eq!(cfg.http_timeout_secs, 10);
        assert_eq!(cfg.selection_cap, 6);
    }
}
