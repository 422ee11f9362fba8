//! View state and the reducers that apply each fetch outcome to it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::ApiError;
use crate::config::DEFAULT_MAX_CHAT_MESSAGES;
use crate::model::{AnalysisReply, ChatMessage, ChatReply, LogEntry, StatsSnapshot};

pub const NOTHING_TO_ANALYZE: &str = "No logs to analyze yet.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisState {
    pub loading: bool,
    pub insight: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub logs: Vec<LogEntry>,
    pub log_error: Option<String>,
    pub stats: StatsSnapshot,
    pub messages: Vec<ChatMessage>,
    pub chat_input: String,
    pub chat_loading: bool,
    pub analysis: AnalysisState,
    max_chat_messages: usize,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CHAT_MESSAGES)
    }
}

impl DashboardState {
    pub fn new(max_chat_messages: usize) -> Self {
        DashboardState {
            logs: Vec::new(),
            log_error: None,
            stats: StatsSnapshot::default(),
            messages: Vec::new(),
            chat_input: String::new(),
            chat_loading: false,
            analysis: AnalysisState::default(),
            max_chat_messages: max_chat_messages.max(1),
        }
    }

    /// Replace the log collection on success; on failure keep what is shown and surface the error.
    pub fn apply_logs(&mut self, outcome: Result<Vec<LogEntry>, ApiError>) {
        match outcome {
            Ok(entries) => {
                self.logs = entries;
                self.log_error = None;
            }
            Err(e) => self.log_error = Some(format!("Error fetching logs: {}", e)),
        }
    }

    /// Stats failures leave the previous snapshot in place.
    pub fn apply_stats(&mut self, outcome: Result<StatsSnapshot, ApiError>) {
        if let Ok(stats) = outcome {
            self.stats = stats;
        }
    }

    pub fn set_chat_input(&mut self, value: impl Into<String>) {
        self.chat_input = value.into();
    }

    /// Validate and optimistically append a user message.
    ///
    /// Returns the trimmed query to send, or `None` when the query is blank or
    /// a previous one is still outstanding. Nothing changes on `None`.
    pub fn begin_chat(&mut self, query: &str) -> Option<String> {
        let query = query.trim();
        if query.is_empty() || self.chat_loading {
            return None;
        }
        self.chat_input.clear();
        self.push_message(ChatMessage::user(query));
        self.chat_loading = true;
        Some(query.to_string())
    }

    pub fn finish_chat(&mut self, outcome: Result<ChatReply, ApiError>) {
        let message = match outcome {
            Ok(reply) => {
                let meta = reply.meta_line();
                ChatMessage::ai(reply.answer, Some(meta))
            }
            Err(e) => ChatMessage::ai_error(e),
        };
        self.push_message(message);
        self.chat_loading = false;
    }

    /// Returns the log lines to analyze, or `None` when there is nothing to send.
    pub fn begin_analysis(&mut self) -> Option<Vec<String>> {
        if self.analysis.loading {
            return None;
        }
        if self.logs.is_empty() {
            self.analysis.error = Some(NOTHING_TO_ANALYZE.to_string());
            return None;
        }
        self.analysis.loading = true;
        self.analysis.error = None;
        Some(self.logs.iter().map(LogEntry::display_line).collect())
    }

    pub fn finish_analysis(&mut self, outcome: Result<AnalysisReply, ApiError>) {
        match outcome {
            Ok(reply) => {
                self.analysis.insight = Some(reply.text);
                self.analysis.error = None;
            }
            Err(e) => self.analysis.error = Some(format!("Analysis failed: {}", e)),
        }
        self.analysis.loading = false;
    }

    fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        let n = self.messages.len();
        if n > self.max_chat_messages {
            self.messages.drain(0..n - self.max_chat_messages);
        }
    }
}

/// A handle to a [`DashboardState`] owned somewhere else.
///
/// Implementations must not hold a borrow past the closure: the controller
/// calls `update_state` on both sides of an await.
pub trait StateStore: Clone {
    fn update_state<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R;

    fn read_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R;
}

impl StateStore for Rc<RefCell<DashboardState>> {
    fn update_state<R>(&self, f: impl FnOnce(&mut DashboardState) -> R) -> R {
        f(&mut *self.borrow_mut())
    }

    fn read_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        f(&*self.borrow())
    }
}
