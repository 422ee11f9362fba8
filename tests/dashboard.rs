use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log_sentinel::api::{ApiError, Backend};
use log_sentinel::model::{
    AnalysisReply, AnalysisRequest, ChatReply, InsightSource, LogLevel, LogRow, MetricsSnapshot,
    Sender, StatsSnapshot,
};
use log_sentinel::state::NOTHING_TO_ANALYZE;
use log_sentinel::{Dashboard, DashboardConfig, DashboardState, PollGroup, StateStore};

/// Canned responses; `None` makes the matching call fail with a 503.
#[derive(Default)]
struct Script {
    logs: Option<Vec<LogRow>>,
    stats: Option<StatsSnapshot>,
    metrics: Option<MetricsSnapshot>,
    chat: Option<ChatReply>,
    analysis: Option<AnalysisReply>,
}

#[derive(Clone, Default)]
struct FakeBackend {
    script: Rc<RefCell<Script>>,
    calls: Rc<RefCell<Vec<String>>>,
    analyzed: Rc<RefCell<Option<AnalysisRequest>>>,
}

fn unavailable() -> ApiError {
    ApiError::Status {
        status: 503,
        body: "unavailable".to_string(),
    }
}

impl FakeBackend {
    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn count(&self, prefix: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

impl Backend for FakeBackend {
    async fn fetch_logs(&self, limit: u32) -> Result<Vec<LogRow>, ApiError> {
        self.record(format!("logs:{}", limit));
        self.script.borrow().logs.clone().ok_or_else(unavailable)
    }

    async fn fetch_stats(&self) -> Result<StatsSnapshot, ApiError> {
        self.record("stats");
        self.script.borrow().stats.ok_or_else(unavailable)
    }

    async fn fetch_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        self.record("metrics");
        self.script.borrow().metrics.ok_or_else(unavailable)
    }

    async fn chat(&self, message: &str) -> Result<ChatReply, ApiError> {
        self.record(format!("chat:{}", message));
        // Stay in flight for one poll so overlapping sends can be observed.
        tokio::task::yield_now().await;
        self.script.borrow().chat.clone().ok_or_else(unavailable)
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisReply, ApiError> {
        self.record("analyze");
        *self.analyzed.borrow_mut() = Some(request.clone());
        self.script.borrow().analysis.clone().ok_or_else(unavailable)
    }
}

type TestDashboard = Dashboard<FakeBackend, Rc<RefCell<DashboardState>>>;

fn dashboard_with(script: Script) -> (TestDashboard, FakeBackend) {
    let backend = FakeBackend {
        script: Rc::new(RefCell::new(script)),
        ..FakeBackend::default()
    };
    let store = Rc::new(RefCell::new(DashboardState::default()));
    let dashboard = Dashboard::new(backend.clone(), store, DashboardConfig::default());
    (dashboard, backend)
}

fn row(ts: &str, message: &str) -> LogRow {
    LogRow {
        job: "fake_logs".to_string(),
        timestamp: ts.to_string(),
        message: message.to_string(),
    }
}

fn snapshot(dashboard: &TestDashboard) -> DashboardState {
    dashboard.store().read_state(|s| s.clone())
}

#[tokio::test]
async fn fetch_logs_classifies_and_orders_newest_first() {
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![
            row("1000000000", "ERROR disk full"),
            row("2000000000", "INFO ok"),
        ]),
        ..Script::default()
    });

    dashboard.fetch_logs().await;

    assert_eq!(backend.calls(), vec!["logs:100".to_string()]);
    let state = snapshot(&dashboard);
    assert_eq!(state.logs.len(), 2);
    assert_eq!(state.logs[0].level, LogLevel::Info);
    assert_eq!(state.logs[0].timestamp_ns, 2_000_000_000);
    assert_eq!(state.logs[1].level, LogLevel::Error);
    assert_eq!(state.logs[1].message, "ERROR disk full");
    assert!(state.log_error.is_none());
}

#[tokio::test]
async fn failed_log_fetch_keeps_displayed_logs() {
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("1", "WARNING slow query")]),
        ..Script::default()
    });
    dashboard.fetch_logs().await;

    backend.script.borrow_mut().logs = None;
    dashboard.fetch_logs().await;

    let state = snapshot(&dashboard);
    assert_eq!(state.logs.len(), 1);
    assert_eq!(state.logs[0].level, LogLevel::Warning);
    let error = state.log_error.expect("error banner");
    assert!(error.starts_with("Error fetching logs:"));
    assert!(error.contains("503"));
}

#[tokio::test]
async fn empty_log_result_clears_collection() {
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("1", "INFO a")]),
        ..Script::default()
    });
    dashboard.fetch_logs().await;
    backend.script.borrow_mut().logs = Some(Vec::new());
    dashboard.fetch_logs().await;

    assert!(snapshot(&dashboard).logs.is_empty());
}

#[tokio::test]
async fn stats_failure_is_silent() {
    let (dashboard, _backend) = dashboard_with(Script::default());

    dashboard.fetch_stats().await;

    let state = snapshot(&dashboard);
    assert_eq!(state.stats, StatsSnapshot::default());
    assert!(state.log_error.is_none());
    assert!(state.messages.is_empty());
}

#[tokio::test]
async fn refresh_runs_both_fetches() {
    let stats = StatsSnapshot {
        chromadb_count: 120,
        logs_added: 30,
        logs_processed: 28,
    };
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("5", "INFO up")]),
        stats: Some(stats),
        ..Script::default()
    });

    dashboard.refresh().await;

    assert_eq!(backend.count("logs"), 1);
    assert_eq!(backend.count("stats"), 1);
    let state = snapshot(&dashboard);
    assert_eq!(state.stats, stats);
    assert_eq!(state.logs.len(), 1);
}

#[tokio::test]
async fn blank_chat_makes_no_call() {
    let (dashboard, backend) = dashboard_with(Script::default());

    assert!(!dashboard.send_chat("   \n").await);

    assert!(backend.calls().is_empty());
    assert!(snapshot(&dashboard).messages.is_empty());
}

#[tokio::test]
async fn successful_chat_appends_user_and_ai_messages() {
    let (dashboard, backend) = dashboard_with(Script {
        chat: Some(ChatReply {
            answer: "Three DB timeouts in the last minute".to_string(),
            logs_found: 3,
            total_in_db: 90,
        }),
        ..Script::default()
    });
    dashboard
        .store()
        .update_state(|s| s.set_chat_input(" show me all errors "));

    assert!(dashboard.send_chat(" show me all errors ").await);

    assert_eq!(backend.calls(), vec!["chat:show me all errors".to_string()]);
    let state = snapshot(&dashboard);
    assert!(!state.chat_loading);
    assert_eq!(state.chat_input, "");
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[0].sender, Sender::User);
    assert_eq!(state.messages[0].text, "show me all errors");
    assert_eq!(state.messages[1].sender, Sender::Ai);
    assert_eq!(
        state.messages[1].meta.as_deref(),
        Some("📊 Found 3 relevant logs out of 90 total in ChromaDB")
    );
}

#[tokio::test]
async fn failed_chat_appends_one_error_message() {
    let (dashboard, _backend) = dashboard_with(Script::default());
    dashboard.send_chat("why is cpu high?").await;
    let before = snapshot(&dashboard).messages.len();

    dashboard.send_chat("and memory?").await;

    let state = snapshot(&dashboard);
    assert!(!state.chat_loading);
    // One optimistic user message plus one AI error message.
    assert_eq!(state.messages.len(), before + 2);
    let last = state.messages.last().unwrap();
    assert_eq!(last.sender, Sender::Ai);
    assert!(last.is_error());
    assert!(last.text.contains("Error"));
}

#[tokio::test]
async fn chat_is_rejected_while_one_is_in_flight() {
    let (dashboard, backend) = dashboard_with(Script {
        chat: Some(ChatReply {
            answer: "ok".to_string(),
            logs_found: 0,
            total_in_db: 0,
        }),
        ..Script::default()
    });

    let (first, second) = futures::join!(dashboard.send_chat("first"), dashboard.send_chat("second"));

    assert!(first);
    assert!(!second);
    assert_eq!(backend.count("chat"), 1);
    assert_eq!(snapshot(&dashboard).messages.len(), 2);
}

#[tokio::test]
async fn analysis_without_logs_makes_no_call() {
    let (dashboard, backend) = dashboard_with(Script::default());

    assert!(!dashboard.analyze_logs().await);

    assert!(backend.calls().is_empty());
    let state = snapshot(&dashboard);
    assert_eq!(state.analysis.error.as_deref(), Some(NOTHING_TO_ANALYZE));
}

#[tokio::test]
async fn analysis_sends_logs_with_metrics() {
    let metrics = MetricsSnapshot {
        cpu_usage: 72.0,
        memory_usage: 63.0,
        containers_running: 5,
    };
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("1000000000", "ERROR disk full")]),
        metrics: Some(metrics),
        analysis: Some(AnalysisReply {
            text: "Disk pressure on the db host".to_string(),
            source: InsightSource::Candidates,
        }),
        ..Script::default()
    });
    dashboard.fetch_logs().await;

    assert!(dashboard.analyze_logs().await);

    let request = backend.analyzed.borrow().clone().expect("analyze called");
    assert_eq!(request.metrics, Some(metrics));
    assert_eq!(request.logs.len(), 1);
    assert!(request.logs[0].ends_with("[fake_logs] [ERROR] ERROR disk full"));
    let state = snapshot(&dashboard);
    assert!(!state.analysis.loading);
    assert_eq!(
        state.analysis.insight.as_deref(),
        Some("Disk pressure on the db host")
    );
}

#[tokio::test]
async fn analysis_proceeds_without_metrics_and_reports_failure() {
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("1", "INFO a")]),
        ..Script::default()
    });
    dashboard.fetch_logs().await;

    assert!(dashboard.analyze_logs().await);

    assert_eq!(backend.count("metrics"), 1);
    assert_eq!(backend.count("analyze"), 1);
    let request = backend.analyzed.borrow().clone().unwrap();
    assert_eq!(request.metrics, None);
    let state = snapshot(&dashboard);
    assert!(!state.analysis.loading);
    assert!(state.analysis.error.unwrap().starts_with("Analysis failed:"));
}

#[tokio::test(start_paused = true)]
async fn pollers_run_on_their_own_intervals_until_stopped() {
    let (dashboard, backend) = dashboard_with(Script {
        logs: Some(vec![row("1", "INFO a")]),
        stats: Some(StatsSnapshot::default()),
        ..Script::default()
    });
    let local = tokio::task::LocalSet::new();

    local
        .run_until(async {
            let mut group = PollGroup::new();
            let (logs, stats) = dashboard.schedule(&mut group);
            tokio::task::spawn_local(logs);
            tokio::task::spawn_local(stats);

            // Both fire once at mount.
            tokio::time::sleep(Duration::from_millis(1)).await;
            assert_eq!(backend.count("logs"), 1);
            assert_eq!(backend.count("stats"), 1);

            // Stats every 5s, logs every 15s.
            tokio::time::sleep(Duration::from_secs(16)).await;
            assert_eq!(backend.count("stats"), 4);
            assert_eq!(backend.count("logs"), 2);

            group.stop();
            tokio::time::sleep(Duration::from_secs(60)).await;
            assert_eq!(backend.count("stats"), 4);
            assert_eq!(backend.count("logs"), 2);
        })
        .await;
}
