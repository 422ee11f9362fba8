use dioxus::prelude::*;

use crate::model::LogEntry;

#[component]
pub fn LogsPanel(logs: Vec<LogEntry>, error: Option<String>) -> Element {
    rsx! {
        div { class: "logs-panel",
            div { class: "panel-header",
                h2 { class: "panel-title", "📜 Real-Time Logs" }
            }

            {if let Some(err) = error.as_ref() {
                rsx! { p { class: "error-banner", "{err}" } }
            } else {
                rsx! { }
            }}

            div { class: "log-box",
                if logs.is_empty() {
                    p { class: "empty-message", "⏳ Waiting for logs..." }
                } else {
                    for (index, entry) in logs.iter().enumerate() {
                        LogLine { key: "{index}", entry: entry.clone() }
                    }
                }
            }
        }
    }
}

#[component]
pub fn LogLine(entry: LogEntry) -> Element {
    let class = format!("log-line {}", entry.level.display_class());
    rsx! {
        div { class: "{class}", "data-level": entry.level.as_str(),
            span { class: "log-timestamp", "{entry.timestamp}" }
            span { class: "log-job", "[{entry.job}]" }
            span { class: "log-level", "[{entry.level.display_name()}]" }
            span { class: "log-message", "{entry.message}" }
        }
    }
}
