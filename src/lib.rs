//! Time Frame - A state-managed HTTP server for a persisted countdown timer
//!
//! This library provides a countdown timer state machine persisted to a
//! durable key-value store, an HTTP API driving its transitions, and a
//! periodic display-refresh task publishing derived readouts.

pub mod api;
pub mod calendar;
pub mod config;
pub mod state;
pub mod storage;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, TimerState};
pub use storage::{JsonFileStore, StateStore};
pub use utils::shutdown_signal;
