use dioxus::prelude::*;

use crate::state::AnalysisState;

#[component]
pub fn AnalysisPanel(analysis: AnalysisState, on_analyze: EventHandler<()>) -> Element {
    let label = if analysis.loading { "⏳ Analyzing..." } else { "🧠 Analyze displayed logs" };
    rsx! {
        div { class: "analysis-panel",
            button {
                class: "btn-secondary",
                disabled: analysis.loading,
                onclick: move |_| on_analyze.call(()),
                "{label}"
            }
            {analysis.error.as_ref().map(|err| rsx! {
                p { class: "error-banner", "{err}" }
            })}
            {analysis.insight.as_ref().map(|insight| rsx! {
                div { class: "analysis-insight", "{insight}" }
            })}
        }
    }
}
