//! reqwest-backed [`Backend`]: one base address, no auth, no retry.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::wire::{self, ChatResponse, HealthResponse, LogsResponse, MetricsResponse};
use super::{ApiError, Backend};
use crate::model::{
    AnalysisReply, AnalysisRequest, ChatReply, LogRow, MetricsSnapshot, StatsSnapshot,
};

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpBackend { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Status {
            status: status.as_u16(),
            body,
        });
    }
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl Backend for HttpBackend {
    async fn fetch_logs(&self, limit: u32) -> Result<Vec<LogRow>, ApiError> {
        let body: LogsResponse = self.get_json(&format!("/logs?limit={}", limit)).await?;
        Ok(body.into_rows())
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        let body: HealthResponse = self.get_json("/health").await?;
        Ok(body.into())
    }

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        let body: MetricsResponse = self.get_json("/metrics").await?;
        Ok(body.into())
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        let body: ChatResponse = self.post_json("/chat", &ChatRequest { message }).await?;
        Ok(body.into())
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReply, ApiError> {
        let body: serde_json::Value = self.post_json("/analyze", request).await?;
        wire::analysis_reply(&body)
            .ok_or_else(|| ApiError::Decode("analysis response carried no text".to_string()))
    }
}
