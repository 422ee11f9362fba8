//! The poll-and-sync controller: fetches, normalizes, and hands each outcome to the state reducers.

use std::future::Future;

use tracing::Level;

use crate::api::Backend;
use crate::config::DashboardConfig;
use crate::diagnostics;
use crate::model::{AnalysisRequest, normalize_rows};
use crate::schedule::PollGroup;
use crate::state::StateStore;

#[derive(Clone)]
pub struct Dashboard<B, S> {
    backend: B,
    store: S,
    config: DashboardConfig,
}

impl<B: Backend, S: StateStore> Dashboard<B, S> {
    pub fn new(backend: B, store: S, config: DashboardConfig) -> Self {
        Dashboard {
            backend,
            store,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch recent rows and replace the displayed logs. Errors are shown, not retried.
    pub async fn fetch_logs(&self) {
        let limit = self.config.log_limit;
        let outcome = self.backend.fetch_logs(limit).await.map(normalize_rows);
        match &outcome {
            Ok(entries) => diagnostics::record(
                Level::DEBUG,
                format!("Logs: {} entries (limit {})", entries.len(), limit),
            ),
            Err(e) => diagnostics::record(Level::ERROR, format!("Logs: {}", e)),
        }
        self.store.update_state(|s| s.apply_logs(outcome));
    }

    /// Fetch counters. A failure is only recorded; the previous snapshot stays.
    pub async fn fetch_stats(&self) {
        let outcome = self.backend.fetch_stats().await;
        if let Err(e) = &outcome {
            diagnostics::record(Level::WARN, format!("Stats: {}", e));
        }
        self.store.update_state(|s| s.apply_stats(outcome));
    }

    /// Manual refresh: both fetches, concurrently.
    pub async fn refresh(&self) {
        diagnostics::record(Level::INFO, "Refresh requested");
        futures::join!(self.fetch_logs(), self.fetch_stats());
    }

    /// Send a chat query. Returns `false` without touching the network when the
    /// query is blank or another one is still in flight.
    pub async fn send_chat(&self, query: &str) -> bool {
        let Some(query) = self.store.update_state(|s| s.begin_chat(query)) else {
            return false;
        };
        diagnostics::record(Level::INFO, format!("Chat: sending {} chars", query.len()));
        let outcome = self.backend.chat(&query).await;
        if let Err(e) = &outcome {
            diagnostics::record(Level::ERROR, format!("Chat: {}", e));
        }
        self.store.update_state(|s| s.finish_chat(outcome));
        true
    }

    /// Ask the backend to analyze the displayed logs, with metrics when they can be had.
    pub async fn analyze_logs(&self) -> bool {
        let Some(logs) = self.store.update_state(|s| s.begin_analysis()) else {
            return false;
        };
        let metrics = match self.backend.fetch_metrics().await {
            Ok(m) => Some(m),
            Err(e) => {
                diagnostics::record(Level::WARN, format!("Metrics: {}; analyzing logs only", e));
                None
            }
        };
        let request = AnalysisRequest { metrics, logs };
        diagnostics::record(
            Level::INFO,
            format!("Analyze: {} log lines", request.logs.len()),
        );
        let outcome = self.backend.analyze(&request).await;
        if let Err(e) = &outcome {
            diagnostics::record(Level::ERROR, format!("Analyze: {}", e));
        }
        self.store.update_state(|s| s.finish_analysis(outcome));
        true
    }
}

impl<B, S> Dashboard<B, S>
where
    B: Backend + Clone + 'static,
    S: StateStore + 'static,
{
    /// Register the log and stats pollers on `group` and return them for the caller to spawn.
    pub fn schedule(
        &self,
        group: &mut PollGroup,
    ) -> (impl Future<Output = ()> + use<B, S>, impl Future<Output = ()> + use<B, S>) {
        let logs = self.clone();
        let logs_poller = group.every(self.config.logs_interval, move || {
            let dashboard = logs.clone();
            async move { dashboard.fetch_logs().await }
        });
        let stats = self.clone();
        let stats_poller = group.every(self.config.stats_interval, move || {
            let dashboard = stats.clone();
            async move { dashboard.fetch_stats().await }
        });
        (logs_poller, stats_poller)
    }
}
