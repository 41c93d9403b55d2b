//! State management module
//!
//! This module contains the timer state machine and the application state
//! that owns it.

pub mod app_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{TimerPhase, TimerSnapshot, TimerState, DEFAULT_DURATION_MS, MAX_DURATION_MS};
