//! Time Frame - A state-managed HTTP server for a persisted countdown timer
//!
//! This is the main entry point for the time-frame application.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use time_frame::{
    api::create_router,
    config::Config,
    state::{AppState, TimerState},
    storage::{JsonFileStore, StateStore},
    tasks::display_refresh_task,
    utils::{shutdown_signal, SystemClock},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("time_frame={},tower_http=info", config.log_level()))
        .init();

    info!("Starting time-frame server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, default duration={}min, storage={}",
        config.host,
        config.port,
        config.duration,
        config.storage_file.display()
    );

    // Load the persisted timer record, falling back to defaults
    let store = Arc::new(JsonFileStore::new(config.storage_file.clone()));
    let timer = match store.load() {
        Ok(Some(timer)) => {
            info!("Loaded persisted timer state ({}ms duration)", timer.duration_ms);
            timer
        }
        Ok(None) => {
            info!("No persisted timer state, starting fresh");
            TimerState::new(config.default_duration_ms())
        }
        Err(e) => {
            warn!("Failed to load timer state, starting fresh: {}", e);
            TimerState::new(config.default_duration_ms())
        }
    };

    // Create application state
    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        timer,
        Arc::new(SystemClock),
        store,
    ));

    // Start the display refresh background task
    let refresh_state = Arc::clone(&state);
    tokio::spawn(async move {
        display_refresh_task(refresh_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /timer/start        - Start the countdown");
    info!("  POST /timer/toggle       - Pause or resume");
    info!("  POST /timer/reset        - Back to ready");
    info!("  POST /timer/duration     - Set a custom duration");
    info!("  POST /timer/preset/:name - Apply a preset duration");
    info!("  GET  /status             - Timer snapshot and calendar readouts");
    info!("  GET  /health             - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
