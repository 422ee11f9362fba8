//! In-app diagnostics buffer for the Diagnostics panel, mirrored to `tracing`.

use std::sync::{Mutex, OnceLock};

use tracing::Level;

const MAX_ENTRIES: usize = 2000;

static BUFFER: OnceLock<Mutex<Vec<DiagnosticEntry>>> = OnceLock::new();

#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticEntry {
    pub time: String,
    pub level: Level,
    pub message: String,
}

fn buffer() -> &'static Mutex<Vec<DiagnosticEntry>> {
    BUFFER.get_or_init(|| Mutex::new(Vec::new()))
}

/// Record a line. Callable from any task; never fails.
pub fn record(level: Level, message: impl Into<String>) {
    let message = message.into();
    match level {
        Level::ERROR => tracing::error!("{}", message),
        Level::WARN => tracing::warn!("{}", message),
        Level::INFO => tracing::info!("{}", message),
        Level::DEBUG => tracing::debug!("{}", message),
        _ => tracing::trace!("{}", message),
    }
    let entry = DiagnosticEntry {
        time: chrono::Utc::now().format("%H:%M:%S%.3f").to_string(),
        level,
        message,
    };
    if let Ok(mut v) = buffer().lock() {
        v.push(entry);
        let n = v.len();
        if n > MAX_ENTRIES {
            v.drain(0..n - MAX_ENTRIES);
        }
    }
}

pub fn snapshot() -> Vec<DiagnosticEntry> {
    buffer().lock().map(|v| v.clone()).unwrap_or_default()
}
