//! Utility modules shared across the application.

pub mod clock;
pub mod format;
pub mod signals;

// Re-export main items
pub use clock::{Clock, SystemClock};
pub use format::format_hms;
pub use signals::shutdown_signal;
