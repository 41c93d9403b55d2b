//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    storage::StateStore,
    utils::Clock,
};

use super::{TimerSnapshot, TimerState};

/// Owner of one timer instance and its collaborators.
///
/// The timer is an explicit value behind a mutex, not a module global, so
/// several independent timers are just several `AppState` values. Every
/// mutation is a sequential read-modify-write under the lock, followed by a
/// best-effort save to the store and a snapshot broadcast on the watch
/// channel; a failed save never rolls back the in-memory transition.
pub struct AppState {
    /// The single timer this instance owns
    timer: Mutex<TimerState>,
    /// Wall-clock source for all transitions and queries
    clock: Arc<dyn Clock>,
    /// Durable store the timer record is persisted to
    store: Arc<dyn StateStore>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
    /// Channel carrying the latest timer snapshot
    pub timer_update_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _timer_update_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState owning the given timer.
    pub fn new(
        port: u16,
        host: String,
        timer: TimerState,
        clock: Arc<dyn Clock>,
        store: Arc<dyn StateStore>,
    ) -> Self {
        let initial_snapshot = timer.snapshot(clock.now_ms());
        let (timer_update_tx, timer_update_rx) = watch::channel(initial_snapshot);

        Self {
            timer: Mutex::new(timer),
            clock,
            store,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
            timer_update_tx,
            _timer_update_rx: timer_update_rx,
        }
    }

    /// Apply a timer transition, persist the result, and broadcast the new
    /// snapshot. Returns the post-transition snapshot.
    fn update_timer<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot, String>
    where
        F: FnOnce(&mut TimerState, i64),
    {
        let now_ms = self.clock.now_ms();

        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        updater(&mut timer, now_ms);
        let persisted = timer.clone();
        let snapshot = timer.snapshot(now_ms);
        drop(timer); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(self.clock.now_utc());
        }

        // Best-effort durability; the in-memory state stays authoritative.
        if let Err(e) = self.store.save(&persisted) {
            warn!("Failed to persist timer state: {}", e);
        }

        if let Err(e) = self.timer_update_tx.send(snapshot.clone()) {
            warn!("Failed to send timer update: {}", e);
        }

        Ok(snapshot)
    }

    /// Replace the countdown length. The caller has already validated that
    /// the value is positive.
    pub fn set_duration(&self, duration_ms: u64) -> Result<TimerSnapshot, String> {
        info!("Setting timer duration to {}ms", duration_ms);
        self.update_timer("set-duration", |timer, _now| {
            timer.set_duration(duration_ms)
        })
    }

    /// Start the countdown. No-op if already started.
    pub fn start(&self) -> Result<TimerSnapshot, String> {
        info!("Starting timer");
        self.update_timer("start", |timer, now| timer.start(now))
    }

    /// Pause a running timer or resume a paused one. No-op from Ready.
    pub fn toggle_pause_resume(&self) -> Result<TimerSnapshot, String> {
        info!("Toggling timer pause/resume");
        self.update_timer("toggle", |timer, now| timer.toggle_pause_resume(now))
    }

    /// Return the timer to Ready, keeping its configured duration.
    pub fn reset(&self) -> Result<TimerSnapshot, String> {
        info!("Resetting timer");
        self.update_timer("reset", |timer, _now| timer.reset())
    }

    /// Current snapshot; a pure query that mutates nothing.
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        let timer = self
            .timer
            .lock()
            .map_err(|e| format!("Failed to lock timer state: {}", e))?;
        Ok(timer.snapshot(self.clock.now_ms()))
    }

    /// Current wall-clock reading, for the calendar readouts.
    pub fn now_utc(&self) -> DateTime<Utc> {
        self.clock.now_utc()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
