//! Boundary to the observability backend.
//!
//! [`Backend`] is the one normalized contract the controller talks to. Raw
//! response shapes live in [`wire`] and never leak past this module; the
//! production implementation is [`HttpBackend`].

mod http;
pub mod wire;

pub use http::HttpBackend;

use thiserror::Error;

use crate::model::{
    AnalysisReply, AnalysisRequest, ChatReply, LogRow, MetricsSnapshot, StatsSnapshot,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Operations the dashboard needs from its backend.
///
/// Futures are not required to be `Send`: in the browser every call runs on
/// the single JS event loop.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// `GET /logs?limit=N`, flattened to one row per value.
    async fn fetch_logs(&self, limit: u32) -> Result<Vec<LogRow>, ApiError>;

    /// `GET /health` counters.
    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError>;

    /// `GET /metrics` gauges, used as context for analysis.
    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, ApiError>;

    /// `POST /chat`.
    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError>;

    /// `POST /analyze`.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReply, ApiError>;
}
