//! Dashboard settings, baked in at compile time.
//!
//! `build.rs` forwards `DASHBOARD_*` entries from `.env` as rustc env vars, so
//! the values survive into the wasm bundle where there is no process
//! environment to read.

use std::time::Duration;

use tracing::Level;

use crate::diagnostics;

pub const BACKEND_URL_KEY: &str = "DASHBOARD_BACKEND_URL";
pub const LOG_LIMIT_KEY: &str = "DASHBOARD_LOG_LIMIT";
pub const LOGS_INTERVAL_KEY: &str = "DASHBOARD_LOGS_INTERVAL_SECS";
pub const STATS_INTERVAL_KEY: &str = "DASHBOARD_STATS_INTERVAL_SECS";
pub const MAX_CHAT_MESSAGES_KEY: &str = "DASHBOARD_MAX_CHAT_MESSAGES";

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_LIMIT: u32 = 100;
pub const DEFAULT_LOGS_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_STATS_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_CHAT_MESSAGES: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub backend_url: String,
    pub log_limit: u32,
    pub logs_interval: Duration,
    pub stats_interval: Duration,
    pub max_chat_messages: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            log_limit: DEFAULT_LOG_LIMIT,
            logs_interval: DEFAULT_LOGS_INTERVAL,
            stats_interval: DEFAULT_STATS_INTERVAL,
            max_chat_messages: DEFAULT_MAX_CHAT_MESSAGES,
        }
    }
}

fn build_env(key: &str) -> Option<String> {
    let value = match key {
        BACKEND_URL_KEY => option_env!("DASHBOARD_BACKEND_URL"),
        LOG_LIMIT_KEY => option_env!("DASHBOARD_LOG_LIMIT"),
        LOGS_INTERVAL_KEY => option_env!("DASHBOARD_LOGS_INTERVAL_SECS"),
        STATS_INTERVAL_KEY => option_env!("DASHBOARD_STATS_INTERVAL_SECS"),
        MAX_CHAT_MESSAGES_KEY => option_env!("DASHBOARD_MAX_CHAT_MESSAGES"),
        _ => None,
    };
    value.map(str::to_string)
}

impl DashboardConfig {
    /// Resolve from the values captured at build time.
    pub fn from_build_env() -> Self {
        Self::from_lookup(build_env)
    }

    /// Resolve from an arbitrary key lookup; anything missing or invalid keeps its default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = DashboardConfig::default();
        let backend_url = lookup(BACKEND_URL_KEY)
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.backend_url);

        DashboardConfig {
            backend_url,
            log_limit: parse_positive(&lookup, LOG_LIMIT_KEY).unwrap_or(defaults.log_limit),
            logs_interval: parse_positive(&lookup, LOGS_INTERVAL_KEY)
                .map(Duration::from_secs)
                .unwrap_or(defaults.logs_interval),
            stats_interval: parse_positive(&lookup, STATS_INTERVAL_KEY)
                .map(Duration::from_secs)
                .unwrap_or(defaults.stats_interval),
            max_chat_messages: parse_positive(&lookup, MAX_CHAT_MESSAGES_KEY)
                .unwrap_or(defaults.max_chat_messages),
        }
    }

    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

fn parse_positive<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) if v != T::default() => Some(v),
        _ => {
            diagnostics::record(
                Level::WARN,
                format!("Config: ignoring {}={:?}, using default", key, raw),
            );
            None
        }
    }
}
