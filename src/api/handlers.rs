//! HTTP endpoint handlers
//!
//! Handlers validate input before the timer sees it; invalid-state calls
//! (starting an already-started timer, toggling from Ready) are silent
//! no-ops inside the state machine and still answer with the current
//! snapshot.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, info, warn};

use crate::{
    calendar::{iso_week_label, year_progress},
    config::preset_duration_ms,
    state::AppState,
};

use super::{
    requests::SetDurationRequest,
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

/// Handle POST /timer/start - Start the countdown
pub async fn start_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.start() {
        Ok(snapshot) => {
            info!("Start endpoint called - timer status: {}", snapshot.status);
            Ok(Json(ApiResponse::ok("Timer started".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to start timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/toggle - Pause or resume the countdown
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.toggle_pause_resume() {
        Ok(snapshot) => {
            info!("Toggle endpoint called - timer status: {}", snapshot.status);
            Ok(Json(ApiResponse::ok(
                "Timer pause/resume toggled".to_string(),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to toggle timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/reset - Return the timer to Ready
pub async fn reset_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match state.reset() {
        Ok(snapshot) => {
            info!("Reset endpoint called - timer back to {}", snapshot.status);
            Ok(Json(ApiResponse::ok("Timer reset".to_string(), snapshot)))
        }
        Err(e) => {
            error!("Failed to reset timer: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/duration - Set a custom countdown length
pub async fn set_duration_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SetDurationRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let duration_ms = match request.resolve_duration_ms() {
        Ok(duration_ms) => duration_ms,
        Err(e) => {
            warn!("Rejected duration request: {}", e);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    match state.set_duration(duration_ms) {
        Ok(snapshot) => {
            info!("Duration set to {}ms", duration_ms);
            Ok(Json(ApiResponse::ok(
                format!("Duration set to {}", snapshot.display),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to set duration: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /timer/preset/:name - Set the duration from the preset table
pub async fn preset_handler(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let Some(duration_ms) = preset_duration_ms(&name) else {
        warn!("Unknown duration preset: {}", name);
        return Err(StatusCode::NOT_FOUND);
    };

    match state.set_duration(duration_ms) {
        Ok(snapshot) => {
            info!("Preset '{}' applied ({}ms)", name, duration_ms);
            Ok(Json(ApiResponse::ok(
                format!("Preset '{}' applied", name),
                snapshot,
            )))
        }
        Err(e) => {
            error!("Failed to apply preset '{}': {}", name, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET /status - Return the timer snapshot and calendar readouts
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to read timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let now = state.now_utc();
    let progress = year_progress(now);
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        week: iso_week_label(now),
        year_progress_text: progress.elapsed_text(),
        year_progress_percent_text: progress.percent_text(),
        year_progress: progress,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
