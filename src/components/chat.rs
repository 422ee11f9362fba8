use dioxus::prelude::*;

use crate::model::{ChatMessage, Sender};

#[component]
pub fn ChatPanel(
    messages: Vec<ChatMessage>,
    input: String,
    loading: bool,
    on_input: EventHandler<String>,
    on_send: EventHandler<()>,
) -> Element {
    let can_send = !loading && !input.trim().is_empty();
    let send_class = if can_send { "btn-send" } else { "btn-send btn-disabled" };
    let send_label = if loading { "⏳ Send" } else { "📤 Send" };

    rsx! {
        div { class: "chat-panel",
            h2 { class: "panel-title", "🤖 AI Observability Assistant" }

            div { class: "chat-box",
                if messages.is_empty() {
                    div { class: "chat-welcome",
                        p { "👋 Hi! Ask me about your system logs and performance." }
                        p { class: "chat-hint",
                            "Try: \"Show me all errors\" or \"What's causing high CPU?\""
                        }
                    }
                }
                for (index, message) in messages.iter().enumerate() {
                    ChatBubble { key: "{index}", message: message.clone() }
                }
                if loading {
                    div { class: "loading-message",
                        span { class: "loading-dots", "● ● ●" }
                        span { class: "loading-text", "Analyzing logs with AI..." }
                    }
                }
            }

            div { class: "input-container",
                input {
                    class: "chat-input",
                    placeholder: "Ask about system performance, errors, or patterns...",
                    value: "{input}",
                    disabled: loading,
                    oninput: move |evt| on_input.call(evt.value()),
                    onkeydown: move |evt: KeyboardEvent| {
                        if evt.key() == Key::Enter && !evt.modifiers().shift() {
                            on_send.call(());
                        }
                    },
                }
                button {
                    class: "{send_class}",
                    disabled: !can_send,
                    onclick: move |_| on_send.call(()),
                    "{send_label}"
                }
            }
        }
    }
}

#[component]
pub fn ChatBubble(message: ChatMessage) -> Element {
    let (class, who) = match message.sender {
        Sender::User => ("message message-user", "You"),
        Sender::Ai if message.is_error() => ("message message-ai message-error", "🤖 AI"),
        Sender::Ai => ("message message-ai", "🤖 AI"),
    };
    rsx! {
        div { class: "message-wrapper",
            div { class: "{class}",
                strong { class: "message-sender", "{who}:" }
                div { class: "message-text", "{message.text}" }
                {message.meta.as_ref().map(|meta| rsx! {
                    div { class: "message-meta", "{meta}" }
                })}
            }
        }
    }
}
