//! Countdown timer state machine

use serde::{Deserialize, Serialize};

use crate::utils::format::format_hms;

/// Default countdown length: 30 minutes.
pub const DEFAULT_DURATION_MS: u64 = 1_800_000;

/// Largest countdown length the elapsed/remaining arithmetic supports.
/// Durations are stored as `u64` but subtracted in `i64`, so validation
/// rejects anything above this before it reaches the timer.
pub const MAX_DURATION_MS: u64 = i64::MAX as u64;

/// Lifecycle phase derived from the stored fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Not yet started; `started_at` is absent.
    Ready,
    /// Actively counting down (or overdue).
    Running,
    /// Started but frozen at `paused_at`.
    Paused,
}

/// Persisted countdown timer state.
///
/// All transitions take `now` in milliseconds since the Unix epoch, so the
/// type itself is pure and every behavior is reproducible in tests. The
/// record is serialized with camelCase field names, which keeps stored JSON
/// interchangeable with earlier deployments of this tool.
///
/// Timestamps are wall-clock epoch millis and are trusted across restarts:
/// a system-clock change between save and load shifts elapsed time. This is
/// an accepted limitation, not compensated for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    /// Target countdown length. Required when loading a stored record; a
    /// record without it is treated as absent entirely.
    pub duration_ms: u64,
    /// Instant the timer was started from zero; `None` means Ready.
    #[serde(default)]
    pub started_at: Option<i64>,
    /// Instant of the most recent pause; `None` while running.
    #[serde(default)]
    pub paused_at: Option<i64>,
    /// Total paused time folded out of the elapsed calculation.
    #[serde(default)]
    pub accumulated_paused_ms: u64,
    #[serde(default)]
    pub is_running: bool,
}

impl TimerState {
    /// Create a Ready timer with the given countdown length.
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            started_at: None,
            paused_at: None,
            accumulated_paused_ms: 0,
            is_running: false,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> TimerPhase {
        if self.started_at.is_none() {
            TimerPhase::Ready
        } else if !self.is_running && self.paused_at.is_some() {
            TimerPhase::Paused
        } else {
            TimerPhase::Running
        }
    }

    /// Replace the countdown length and return to Ready.
    ///
    /// Callers validate positivity before invoking this; the transition
    /// itself accepts any length.
    pub fn set_duration(&mut self, duration_ms: u64) {
        self.duration_ms = duration_ms;
        self.started_at = None;
        self.paused_at = None;
        self.accumulated_paused_ms = 0;
        self.is_running = false;
    }

    /// Start counting down from zero. No-op if already started, so duplicate
    /// requests cannot corrupt the state.
    pub fn start(&mut self, now_ms: i64) {
        if self.started_at.is_some() {
            return;
        }
        self.started_at = Some(now_ms);
        self.is_running = true;
        self.paused_at = None;
        self.accumulated_paused_ms = 0;
    }

    /// Pause a running timer, or resume a paused one. No-op from Ready.
    ///
    /// On resume, the completed pause interval is folded into
    /// `accumulated_paused_ms` exactly once; that accumulator only ever
    /// grows, clamped at zero against a backwards clock step.
    pub fn toggle_pause_resume(&mut self, now_ms: i64) {
        if self.started_at.is_none() {
            return;
        }
        if self.is_running {
            self.is_running = false;
            self.paused_at = Some(now_ms);
        } else {
            if let Some(paused_at) = self.paused_at.take() {
                self.accumulated_paused_ms += (now_ms - paused_at).max(0) as u64;
            }
            self.is_running = true;
        }
    }

    /// Return to Ready, keeping the configured countdown length.
    pub fn reset(&mut self) {
        self.started_at = None;
        self.paused_at = None;
        self.accumulated_paused_ms = 0;
        self.is_running = false;
    }

    /// Wall-clock time spent counting down, excluding paused intervals.
    ///
    /// While paused the calculation pins "now" to `paused_at`, which is what
    /// freezes the reading for the whole pause.
    pub fn elapsed_ms(&self, now_ms: i64) -> i64 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let effective_now = if self.is_running {
            now_ms
        } else {
            self.paused_at.unwrap_or(now_ms)
        };
        effective_now - started_at - self.accumulated_paused_ms as i64
    }

    /// Time left on the countdown. Goes negative once overdue; never clamped
    /// so the display can show overtime.
    pub fn remaining_ms(&self, now_ms: i64) -> i64 {
        if self.started_at.is_none() {
            return self.duration_ms as i64;
        }
        self.duration_ms as i64 - self.elapsed_ms(now_ms)
    }

    /// Human-readable status line for the display.
    pub fn status_label(&self, now_ms: i64) -> String {
        match self.phase() {
            TimerPhase::Ready => "Ready".to_string(),
            TimerPhase::Paused => "Paused".to_string(),
            TimerPhase::Running => {
                let remaining = self.remaining_ms(now_ms);
                if remaining < 0 {
                    format!("Overdue by {}", format_hms(remaining.abs()))
                } else {
                    "Running".to_string()
                }
            }
        }
    }

    /// Derived read-only view at a given instant.
    pub fn snapshot(&self, now_ms: i64) -> TimerSnapshot {
        let remaining_ms = self.remaining_ms(now_ms);
        TimerSnapshot {
            phase: self.phase(),
            duration_ms: self.duration_ms,
            elapsed_ms: self.elapsed_ms(now_ms),
            remaining_ms,
            overdue: remaining_ms < 0,
            display: format_hms(remaining_ms),
            status: self.status_label(now_ms),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}

/// Read-only view of the timer at one instant, served by the API and
/// published on the display-refresh channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub duration_ms: u64,
    pub elapsed_ms: i64,
    pub remaining_ms: i64,
    pub overdue: bool,
    /// Remaining time rendered as signed `HH:MM:SS`.
    pub display: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_is_ready_with_full_remaining() {
        let timer = TimerState::new(60_000);
        assert_eq!(timer.phase(), TimerPhase::Ready);
        assert_eq!(timer.elapsed_ms(999_999), 0);
        assert_eq!(timer.remaining_ms(999_999), 60_000);
        assert_eq!(timer.status_label(999_999), "Ready");
    }

    #[test]
    fn set_duration_resets_to_ready() {
        let mut timer = TimerState::new(60_000);
        timer.start(1_000);
        timer.toggle_pause_resume(2_000);
        timer.set_duration(90_000);
        assert_eq!(timer, TimerState::new(90_000));
        assert_eq!(timer.remaining_ms(5_000), 90_000);
        assert_eq!(timer.status_label(5_000), "Ready");
    }

    #[test]
    fn start_is_idempotent() {
        let mut timer = TimerState::new(60_000);
        timer.start(1_000);
        let after_first = timer.clone();
        timer.start(9_000);
        assert_eq!(timer, after_first);
        assert_eq!(timer.started_at, Some(1_000));
    }

    #[test]
    fn start_while_paused_is_a_no_op() {
        let mut timer = TimerState::new(60_000);
        timer.start(1_000);
        timer.toggle_pause_resume(2_000);
        let paused = timer.clone();
        timer.start(3_000);
        assert_eq!(timer, paused);
    }

    #[test]
    fn toggle_from_ready_is_a_no_op() {
        let mut timer = TimerState::new(60_000);
        timer.toggle_pause_resume(1_000);
        assert_eq!(timer, TimerState::new(60_000));
    }

    #[test]
    fn elapsed_counts_while_running() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        assert_eq!(timer.elapsed_ms(10_000), 10_000);
        assert_eq!(timer.remaining_ms(10_000), 50_000);
        assert_eq!(timer.status_label(10_000), "Running");
    }

    #[test]
    fn elapsed_is_frozen_while_paused() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        timer.toggle_pause_resume(10_000);
        assert_eq!(timer.phase(), TimerPhase::Paused);
        // Frozen at the pause instant regardless of how far "now" moves.
        for now in [10_001, 25_000, 50_000, 1_000_000] {
            assert_eq!(timer.elapsed_ms(now), 10_000);
            assert_eq!(timer.remaining_ms(now), 50_000);
            assert_eq!(timer.status_label(now), "Paused");
        }
    }

    #[test]
    fn resume_folds_pause_into_accumulator_once() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        timer.toggle_pause_resume(10_000);
        timer.toggle_pause_resume(40_000);
        assert_eq!(timer.accumulated_paused_ms, 30_000);
        assert_eq!(timer.paused_at, None);
        // elapsed at t3 = (t3 - t0) - (t2 - t1)
        assert_eq!(timer.elapsed_ms(45_000), 15_000);
        assert_eq!(timer.remaining_ms(45_000), 45_000);
    }

    #[test]
    fn repeated_pause_resume_cycles_accumulate() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        timer.toggle_pause_resume(5_000);
        timer.toggle_pause_resume(8_000);
        timer.toggle_pause_resume(20_000);
        timer.toggle_pause_resume(26_000);
        assert_eq!(timer.accumulated_paused_ms, 9_000);
        assert_eq!(timer.elapsed_ms(30_000), 21_000);
    }

    #[test]
    fn resume_clamps_backwards_clock_step() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        timer.toggle_pause_resume(10_000);
        // Clock stepped backwards during the pause.
        timer.toggle_pause_resume(9_000);
        assert_eq!(timer.accumulated_paused_ms, 0);
        assert!(timer.is_running);
    }

    #[test]
    fn reset_restores_ready_and_keeps_duration() {
        let mut timer = TimerState::new(60_000);
        timer.set_duration(120_000);
        timer.start(0);
        timer.toggle_pause_resume(10_000);
        timer.toggle_pause_resume(15_000);
        timer.reset();
        assert_eq!(timer, TimerState::new(120_000));
        assert_eq!(timer.remaining_ms(99_000), 120_000);
        assert_eq!(timer.status_label(99_000), "Ready");
    }

    #[test]
    fn remaining_goes_exactly_negative_when_overdue() {
        let mut timer = TimerState::new(1_800_000);
        timer.start(0);
        assert_eq!(timer.remaining_ms(1_800_001), -1);
        assert_eq!(timer.status_label(1_800_001), "Overdue by 00:00:00");
        assert_eq!(timer.remaining_ms(1_805_000), -5_000);
        assert_eq!(timer.status_label(1_805_000), "Overdue by 00:00:05");
    }

    #[test]
    fn maximum_duration_never_reads_overdue_before_start() {
        let mut timer = TimerState::new(60_000);
        timer.set_duration(MAX_DURATION_MS);
        let snap = timer.snapshot(0);
        assert_eq!(snap.remaining_ms, i64::MAX);
        assert!(!snap.overdue);
        assert_eq!(snap.status, "Ready");
    }

    #[test]
    fn paused_overdue_timer_reads_paused() {
        let mut timer = TimerState::new(1_000);
        timer.start(0);
        timer.toggle_pause_resume(5_000);
        assert_eq!(timer.remaining_ms(9_000), -4_000);
        assert_eq!(timer.status_label(9_000), "Paused");
    }

    #[test]
    fn snapshot_reflects_overdue_state() {
        let mut timer = TimerState::new(60_000);
        timer.start(0);
        let snap = timer.snapshot(63_500);
        assert_eq!(snap.phase, TimerPhase::Running);
        assert_eq!(snap.remaining_ms, -3_500);
        assert!(snap.overdue);
        assert_eq!(snap.display, "-00:00:03");
        assert_eq!(snap.status, "Overdue by 00:00:03");
    }

    #[test]
    fn snapshot_for_ready_timer() {
        let snap = TimerState::new(60_000).snapshot(42);
        assert_eq!(snap.phase, TimerPhase::Ready);
        assert_eq!(snap.elapsed_ms, 0);
        assert_eq!(snap.remaining_ms, 60_000);
        assert!(!snap.overdue);
        assert_eq!(snap.display, "00:01:00");
        assert_eq!(snap.status, "Ready");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let timer = TimerState::new(1_800_000);
        let json = serde_json::to_value(&timer).unwrap();
        assert_eq!(json["durationMs"], 1_800_000);
        assert_eq!(json["startedAt"], serde_json::Value::Null);
        assert_eq!(json["accumulatedPausedMs"], 0);
        assert_eq!(json["isRunning"], false);
    }

    #[test]
    fn deserializes_partial_record_over_defaults() {
        let timer: TimerState = serde_json::from_str(r#"{"durationMs": 300000}"#).unwrap();
        assert_eq!(timer, TimerState::new(300_000));
    }

    #[test]
    fn deserialization_requires_duration() {
        let result =
            serde_json::from_str::<TimerState>(r#"{"startedAt": 123, "isRunning": true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn deserialization_ignores_unknown_fields() {
        let timer: TimerState = serde_json::from_str(
            r#"{"durationMs": 60000, "startedAt": 1000, "isRunning": true, "theme": "dark"}"#,
        )
        .unwrap();
        assert_eq!(timer.started_at, Some(1_000));
        assert!(timer.is_running);
    }
}
