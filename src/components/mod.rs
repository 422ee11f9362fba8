#![allow(non_snake_case)]

//! Dioxus view: the root [`App`] owns the state signal and the pollers.

mod analysis;
mod chat;
mod diagnostics_panel;
mod logs;
mod stats;

use std::rc::Rc;

use dioxus::prelude::*;
use tracing::Level;

use crate::api::HttpBackend;
use crate::config::DashboardConfig;
use crate::controller::Dashboard;
use crate::diagnostics::{self, DiagnosticEntry};
use crate::schedule::PollGroup;
use crate::state::{DashboardState, StateStore};

pub use analysis::AnalysisPanel;
pub use chat::{ChatBubble, ChatPanel};
pub use diagnostics_panel::DiagnosticsPanel;
pub use logs::{LogLine, LogsPanel};
pub use stats::StatsBar;

impl StateStore for Signal<DashboardState> {
    fn update_state<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        let mut signal = *self;
        let mut state = signal.write();
        f(&mut *state)
    }

    fn read_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        let state = self.read();
        f(&*state)
    }
}

#[component]
pub fn App() -> Element {
    let config = use_hook(DashboardConfig::from_build_env);
    let max_chat_messages = config.max_chat_messages;
    let mut store = use_signal(move || DashboardState::new(max_chat_messages));
    let mut diagnostics_open = use_signal(|| false);
    let mut diagnostic_snapshot = use_signal(Vec::<DiagnosticEntry>::new);

    let dashboard = use_hook(|| {
        let backend = HttpBackend::new(config.backend_url.clone());
        Dashboard::new(backend, store, config.clone())
    });

    // Both pollers start with the view and are stopped together when it goes away.
    let polls = use_hook(|| {
        let mut group = PollGroup::new();
        let (logs, stats) = dashboard.schedule(&mut group);
        spawn(logs);
        spawn(stats);
        diagnostics::record(
            Level::INFO,
            format!(
                "Polling {} (logs every {}s, stats every {}s)",
                config.backend_url,
                config.logs_interval.as_secs(),
                config.stats_interval.as_secs()
            ),
        );
        Rc::new(group)
    });
    use_drop({
        let polls = polls.clone();
        move || polls.stop()
    });

    let on_refresh = {
        let dashboard = dashboard.clone();
        move |_: MouseEvent| {
            let dashboard = dashboard.clone();
            spawn(async move { dashboard.refresh().await });
        }
    };
    let on_send = {
        let dashboard = dashboard.clone();
        move |_: ()| {
            let query = store.read().chat_input.clone();
            let dashboard = dashboard.clone();
            spawn(async move {
                dashboard.send_chat(&query).await;
            });
        }
    };
    let on_analyze = {
        let dashboard = dashboard.clone();
        move |_: ()| {
            let dashboard = dashboard.clone();
            spawn(async move {
                dashboard.analyze_logs().await;
            });
        }
    };

    let state = store.read();
    let polling_secs = config.logs_interval.as_secs();

    rsx! {
        document::Stylesheet { href: asset!("/assets/styles.css") }

        div { class: "dashboard",
            StatsBar {
                stats: state.stats,
                displayed: state.logs.len(),
                polling_secs,
                on_refresh,
                on_diagnostics: move |_| {
                    diagnostic_snapshot.set(diagnostics::snapshot());
                    diagnostics_open.set(true);
                },
            }

            if *diagnostics_open.read() {
                DiagnosticsPanel {
                    entries: diagnostic_snapshot.read().clone(),
                    on_reload: move |_| diagnostic_snapshot.set(diagnostics::snapshot()),
                    on_close: move |_| diagnostics_open.set(false),
                }
            }

            div { class: "main-content",
                LogsPanel {
                    logs: state.logs.clone(),
                    error: state.log_error.clone(),
                }
                div { class: "side-column",
                    ChatPanel {
                        messages: state.messages.clone(),
                        input: state.chat_input.clone(),
                        loading: state.chat_loading,
                        on_input: move |value: String| store.write().set_chat_input(value),
                        on_send,
                    }
                    AnalysisPanel {
                        analysis: state.analysis.clone(),
                        on_analyze,
                    }
                }
            }
        }
    }
}
