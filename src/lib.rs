//! Log dashboard: polls an observability backend for log lines and counters,
//! and forwards questions to its AI endpoints.

pub mod api;
pub mod components;
pub mod config;
pub mod controller;
pub mod diagnostics;
pub mod model;
pub mod schedule;
pub mod state;

pub use api::{ApiError, Backend, HttpBackend};
pub use config::DashboardConfig;
pub use controller::Dashboard;
pub use schedule::PollGroup;
pub use state::{DashboardState, StateStore};
