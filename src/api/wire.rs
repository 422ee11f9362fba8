//! Raw backend response shapes and their mapping to [`crate::model`] types.
//!
//! Every field is optional: the backend has shipped several variants and a
//! missing value reads as empty/zero rather than failing the whole fetch.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{AnalysisReply, ChatReply, InsightSource, LogRow, MetricsSnapshot, StatsSnapshot};

const UNKNOWN_JOB: &str = "unknown";
const NO_ANSWER: &str = "No AI response.";

// ---------------------------------------------------------------------------
// GET /logs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    data: Option<LogsData>,
}

#[derive(Debug, Default, Deserialize)]
struct LogsData {
    #[serde(default)]
    result: Option<Vec<LogStream>>,
}

#[derive(Debug, Deserialize)]
struct LogStream {
    #[serde(default)]
    stream: Option<StreamLabels>,
    #[serde(default)]
    values: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct StreamLabels {
    #[serde(default)]
    job: Option<String>,
}

impl LogsResponse {
    /// Flatten every stream's values into rows tagged with the stream's job.
    pub fn into_rows(self) -> Vec<LogRow> {
        let streams = self.data.and_then(|d| d.result).unwrap_or_default();
        streams
            .into_iter()
            .flat_map(|s| {
                let job = s
                    .stream
                    .and_then(|labels| labels.job)
                    .filter(|j| !j.is_empty())
                    .unwrap_or_else(|| UNKNOWN_JOB.to_string());
                s.values.into_iter().map(move |(timestamp, message)| LogRow {
                    job: job.clone(),
                    timestamp,
                    message,
                })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// GET /health, GET /metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    chromadb_count: Option<u64>,
    #[serde(default)]
    logs_added: Option<u64>,
    #[serde(default)]
    logs_processed: Option<u64>,
}

impl From<HealthResponse> for StatsSnapshot {
    fn from(h: HealthResponse) -> Self {
        StatsSnapshot {
            chromadb_count: h.chromadb_count.unwrap_or(0),
            logs_added: h.logs_added.unwrap_or(0),
            logs_processed: h.logs_processed.unwrap_or(0),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct MetricsResponse {
    #[serde(default)]
    cpu_usage: Option<f64>,
    #[serde(default)]
    memory_usage: Option<f64>,
    #[serde(default)]
    containers_running: Option<u64>,
}

impl From<MetricsResponse> for MetricsSnapshot {
    fn from(m: MetricsResponse) -> Self {
        MetricsSnapshot {
            cpu_usage: m.cpu_usage.unwrap_or(0.0),
            memory_usage: m.memory_usage.unwrap_or(0.0),
            containers_running: m.containers_running.unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// POST /chat
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    logs_found: Option<u64>,
    #[serde(default)]
    total_in_db: Option<u64>,
}

impl From<ChatResponse> for ChatReply {
    fn from(c: ChatResponse) -> Self {
        ChatReply {
            answer: c
                .answer
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| NO_ANSWER.to_string()),
            logs_found: c.logs_found.unwrap_or(0),
            total_in_db: c.total_in_db.unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// POST /analyze
// ---------------------------------------------------------------------------

/// Pull the insight text out of whichever variant the backend answered with.
/// Precedence: raw Gemini `candidates`, then `output`, then `insight`.
pub fn analysis_reply(body: &Value) -> Option<AnalysisReply> {
    let candidates = body
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(|t| (t, InsightSource::Candidates));
    let output = || {
        body.get("output")
            .and_then(Value::as_str)
            .map(|t| (t, InsightSource::Output))
    };
    let insight = || {
        body.get("insight")
            .and_then(Value::as_str)
            .map(|t| (t, InsightSource::Insight))
    };

    candidates
        .or_else(output)
        .or_else(insight)
        .map(|(text, source)| AnalysisReply {
            text: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn logs_flatten_across_streams() {
        let body = json!({
            "data": { "result": [
                { "stream": { "job": "fake_logs" }, "values": [["1", "INFO a"], ["2", "ERROR b"]] },
                { "stream": {}, "values": [["3", "c"]] }
            ]}
        });
        let rows = serde_json::from_value::<LogsResponse>(body).unwrap().into_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].job, "fake_logs");
        assert_eq!(rows[1].message, "ERROR b");
        assert_eq!(rows[2].job, "unknown");
        assert_eq!(rows[2].timestamp, "3");
    }

    #[test]
    fn logs_without_data_are_empty() {
        let rows = serde_json::from_value::<LogsResponse>(json!({ "status": "success" }))
            .unwrap()
            .into_rows();
        assert!(rows.is_empty());

        let rows = serde_json::from_value::<LogsResponse>(json!({ "data": { "result": null } }))
            .unwrap()
            .into_rows();
        assert!(rows.is_empty());
    }

    #[test]
    fn health_defaults_missing_and_null_counters() {
        let h: HealthResponse =
            serde_json::from_value(json!({ "status": "ok", "logs_added": null, "chromadb_count": 12 }))
                .unwrap();
        let stats = StatsSnapshot::from(h);
        assert_eq!(
            stats,
            StatsSnapshot {
                chromadb_count: 12,
                logs_added: 0,
                logs_processed: 0
            }
        );
    }

    #[test]
    fn chat_defaults_answer() {
        let c: ChatResponse = serde_json::from_value(json!({ "logs_found": 2 })).unwrap();
        let reply = ChatReply::from(c);
        assert_eq!(reply.answer, "No AI response.");
        assert_eq!(reply.logs_found, 2);
        assert_eq!(reply.total_in_db, 0);
    }

    #[test]
    fn analysis_prefers_candidates() {
        let body = json!({
            "candidates": [{ "content": { "parts": [{ "text": "from gemini" }] } }],
            "output": "from output"
        });
        let reply = analysis_reply(&body).unwrap();
        assert_eq!(reply.text, "from gemini");
        assert_eq!(reply.source, InsightSource::Candidates);
    }

    #[test]
    fn analysis_falls_back_to_output_then_insight() {
        let reply = analysis_reply(&json!({ "output": "o", "insight": "i" })).unwrap();
        assert_eq!(reply.source, InsightSource::Output);

        let reply = analysis_reply(&json!({ "insight": "i" })).unwrap();
        assert_eq!(reply.text, "i");
        assert_eq!(reply.source, InsightSource::Insight);
    }

    #[test]
    fn analysis_without_text_is_none() {
        assert!(analysis_reply(&json!({ "candidates": [] })).is_none());
        assert!(analysis_reply(&json!({ "error": "quota" })).is_none());
    }
}
