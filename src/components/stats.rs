use dioxus::prelude::*;

use crate::model::StatsSnapshot;

#[component]
pub fn StatsBar(
    stats: StatsSnapshot,
    displayed: usize,
    polling_secs: u64,
    on_refresh: EventHandler<MouseEvent>,
    on_diagnostics: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        div { class: "stats-bar",
            StatItem { label: "📊 ChromaDB:", value: "{stats.chromadb_count}" }
            StatItem { label: "✅ Added:", value: "{stats.logs_added}" }
            StatItem { label: "⚙️ Processed:", value: "{stats.logs_processed}" }
            StatItem { label: "📝 Displayed:", value: "{displayed}" }
            StatItem { label: "⏱️ Polling:", value: "{polling_secs}s" }
            button {
                class: "btn-refresh",
                onclick: move |evt| on_refresh.call(evt),
                "🔄 Refresh Now"
            }
            button {
                class: "btn-secondary",
                onclick: move |evt| on_diagnostics.call(evt),
                "📋 Diagnostics"
            }
        }
    }
}

#[component]
fn StatItem(label: String, value: String) -> Element {
    rsx! {
        div { class: "stat-item",
            span { class: "stat-label", "{label}" }
            span { class: "stat-value", "{value}" }
        }
    }
}
