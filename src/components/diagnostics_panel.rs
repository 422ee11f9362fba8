use dioxus::prelude::*;
use tracing::Level;

use crate::diagnostics::DiagnosticEntry;

#[component]
pub fn DiagnosticsPanel(
    entries: Vec<DiagnosticEntry>,
    on_reload: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "overlay-card",
                onclick: move |evt| { evt.stop_propagation(); },
                h2 { class: "panel-title", "📋 Diagnostics" }
                p { class: "overlay-hint", "Fetch activity recorded by the dashboard." }
                div { class: "diagnostics-list",
                    for entry in entries.iter() {
                        div { class: "diagnostic-line",
                            span { class: "diagnostic-time", "{entry.time}" }
                            span {
                                class: if entry.level == Level::ERROR { "diagnostic-level level-error" } else { "diagnostic-level" },
                                "{entry.level}"
                            }
                            span { class: "diagnostic-message", "{entry.message}" }
                        }
                    }
                }
                div { class: "overlay-actions",
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_reload.call(()),
                        "Reload"
                    }
                    button {
                        class: "btn-secondary",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
