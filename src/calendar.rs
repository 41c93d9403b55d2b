//! Calendar readouts: ISO week number and year progress
//!
//! Pure derivations over a supplied instant, surfaced alongside the timer in
//! the status response.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Zero-padded ISO week label, e.g. `Week 07`.
pub fn iso_week_label(date: DateTime<Utc>) -> String {
    format!("Week {:02}", date.iso_week().week())
}

/// How far the current year has progressed at a given instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearProgress {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub percent: f64,
}

impl YearProgress {
    /// `{d} days {h} hours {m} min elapsed`
    pub fn elapsed_text(&self) -> String {
        format!(
            "{} days {} hours {} min elapsed",
            self.days, self.hours, self.minutes
        )
    }

    /// `{p}% of the year`, two decimals.
    pub fn percent_text(&self) -> String {
        format!("{:.2}% of the year", self.percent)
    }
}

/// Compute year progress at `now` (UTC calendar).
pub fn year_progress(now: DateTime<Utc>) -> YearProgress {
    // Jan 1 00:00 is a valid UTC instant for any year chrono can represent.
    let start_of_year = Utc
        .with_ymd_and_hms(now.year(), 1, 1, 0, 0, 0)
        .unwrap();
    let start_of_next_year = Utc
        .with_ymd_and_hms(now.year() + 1, 1, 1, 0, 0, 0)
        .unwrap();

    let elapsed_ms = (now - start_of_year).num_milliseconds();
    let total_ms = (start_of_next_year - start_of_year).num_milliseconds();
    let percent = ((elapsed_ms as f64 / total_ms as f64) * 100.0).clamp(0.0, 100.0);

    let total_minutes = elapsed_ms / 60_000;
    YearProgress {
        days: total_minutes / (60 * 24),
        hours: (total_minutes % (60 * 24)) / 60,
        minutes: total_minutes % 60,
        percent,
    }
}
