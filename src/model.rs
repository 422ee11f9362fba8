//! Display-ready domain records shared by the controller, the state store and the UI.

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Logs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Default,
}

impl LogLevel {
    /// Classify a log line by keyword. Case-insensitive; ERROR beats WARNING beats INFO.
    pub fn classify(message: &str) -> Self {
        let upper = message.to_uppercase();
        if upper.contains("ERROR") {
            LogLevel::Error
        } else if upper.contains("WARNING") {
            LogLevel::Warning
        } else if upper.contains("INFO") {
            LogLevel::Info
        } else {
            LogLevel::Default
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warning => "warning",
            LogLevel::Info => "info",
            LogLevel::Default => "default",
        }
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            LogLevel::Error => "log-error",
            LogLevel::Warning => "log-warning",
            LogLevel::Info => "log-info",
            LogLevel::Default => "log-default",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
            LogLevel::Info => "INFO",
            LogLevel::Default => "DEFAULT",
        }
    }
}

/// One raw row as delivered by the backend, already flattened out of its stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub job: String,
    /// Nanoseconds since the epoch, as the decimal string the backend sends.
    pub timestamp: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub timestamp_ns: i64,
    pub message: String,
    pub level: LogLevel,
    pub job: String,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const UNKNOWN_TIME: &str = "unknown time";

impl LogEntry {
    pub fn from_row(row: LogRow) -> Self {
        Self::from_row_in(row, &Local)
    }

    /// Same as [`LogEntry::from_row`] but renders the timestamp in `tz`.
    pub fn from_row_in<Tz>(row: LogRow, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let parsed = row.timestamp.trim().parse::<i64>().ok();
        let timestamp = parsed
            .map(|ns| format_timestamp(ns, tz))
            .unwrap_or_else(|| UNKNOWN_TIME.to_string());
        LogEntry {
            timestamp,
            timestamp_ns: parsed.unwrap_or(0),
            level: LogLevel::classify(&row.message),
            message: row.message,
            job: row.job,
        }
    }

    /// The line handed to the analysis endpoint.
    pub fn display_line(&self) -> String {
        format!(
            "{} [{}] [{}] {}",
            self.timestamp,
            self.job,
            self.level.display_name(),
            self.message
        )
    }
}

pub fn format_timestamp<Tz>(nanos: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp_nanos(nanos)
        .with_timezone(tz)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Map raw rows to entries, newest first. Rows with equal timestamps keep backend order.
pub fn normalize_rows(rows: Vec<LogRow>) -> Vec<LogEntry> {
    let mut entries: Vec<LogEntry> = rows.into_iter().map(LogEntry::from_row).collect();
    entries.sort_by(|a, b| b.timestamp_ns.cmp(&a.timestamp_ns));
    entries
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    pub meta: Option<String>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        ChatMessage {
            sender: Sender::User,
            text: text.into(),
            meta: None,
        }
    }

    pub fn ai(text: impl Into<String>, meta: Option<String>) -> Self {
        ChatMessage {
            sender: Sender::Ai,
            text: text.into(),
            meta,
        }
    }

    pub fn ai_error(cause: impl std::fmt::Display) -> Self {
        Self::ai(format!("❌ Error: {}", cause), None)
    }

    pub fn is_error(&self) -> bool {
        self.sender == Sender::Ai && self.text.starts_with("❌")
    }
}

/// Normalized `/chat` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub logs_found: u64,
    pub total_in_db: u64,
}

impl ChatReply {
    pub fn meta_line(&self) -> String {
        format!(
            "📊 Found {} relevant logs out of {} total in ChromaDB",
            self.logs_found, self.total_in_db
        )
    }
}

// ---------------------------------------------------------------------------
// Counters and analysis
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub chromadb_count: u64,
    pub logs_added: u64,
    pub logs_processed: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cpu_usage: f64,
    pub memory_usage: f64,
    pub containers_running: u64,
}

/// Body of `POST /analyze`: `{logs}` or `{metrics, logs}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsSnapshot>,
    pub logs: Vec<String>,
}

/// Which response variant the insight text was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSource {
    Candidates,
    Output,
    Insight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReply {
    pub text: String,
    pub source: InsightSource,
}
