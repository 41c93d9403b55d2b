//! Display refresh background task

use std::{sync::Arc, time::Duration};

use tracing::{debug, error, info, warn};

use crate::state::AppState;

/// Background task that republishes the timer snapshot once per second.
///
/// The tick only calls the pure queries and pushes the result onto the watch
/// channel; it never mutates the timer, so the state machine stays driven
/// exclusively by the operation endpoints. Status transitions (Running into
/// overdue, for example) are logged once as they happen.
pub async fn display_refresh_task(state: Arc<AppState>) {
    info!("Starting display refresh task");

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let mut last_status: Option<String> = None;

    loop {
        interval.tick().await;

        match state.snapshot() {
            Ok(snapshot) => {
                if last_status.as_deref() != Some(snapshot.status.as_str()) {
                    info!(
                        "Timer status: {} ({} remaining)",
                        snapshot.status, snapshot.display
                    );
                    last_status = Some(snapshot.status.clone());
                } else {
                    debug!("Timer display: {} [{}]", snapshot.display, snapshot.status);
                }

                if let Err(e) = state.timer_update_tx.send(snapshot) {
                    warn!("Failed to send display update: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to read timer state for display refresh: {}", e);
            }
        }
    }
}
