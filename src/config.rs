//! Configuration, CLI arguments, and duration selection

use std::path::PathBuf;

use clap::Parser;

/// Milliseconds per minute, the unit the custom-duration path works in.
const MS_PER_MINUTE: u64 = 60_000;

/// Named preset durations, mirroring the preset buttons of the original tool.
pub const DURATION_PRESETS: &[(&str, u64)] = &[
    ("5m", 5 * MS_PER_MINUTE),
    ("15m", 15 * MS_PER_MINUTE),
    ("25m", 25 * MS_PER_MINUTE),
    ("30m", 30 * MS_PER_MINUTE),
    ("60m", 60 * MS_PER_MINUTE),
];

/// Look up a preset countdown length by name.
pub fn preset_duration_ms(name: &str) -> Option<u64> {
    DURATION_PRESETS
        .iter()
        .find(|(preset, _)| *preset == name)
        .map(|(_, duration_ms)| *duration_ms)
}

/// Validate a free-form minutes value and convert it to milliseconds.
///
/// This is the caller-side guard: the timer itself never sees a non-positive
/// duration.
pub fn custom_minutes_to_ms(minutes: u64) -> Result<u64, String> {
    if minutes == 0 {
        return Err("Duration must be a positive number of minutes".to_string());
    }
    minutes
        .checked_mul(MS_PER_MINUTE)
        .filter(|&ms| ms <= crate::state::MAX_DURATION_MS)
        .ok_or_else(|| format!("Duration of {} minutes is out of range", minutes))
}

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "time-frame")]
#[command(about = "A state-managed HTTP server for a persisted countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Default countdown duration in minutes, used when no stored state exists
    #[arg(short, long, default_value = "30")]
    pub duration: u64,

    /// Path of the JSON file the timer state is persisted to
    #[arg(short, long, default_value = "time-frame-state.json")]
    pub storage_file: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default countdown length in milliseconds, falling back to 30 minutes
    /// if the configured value does not validate.
    pub fn default_duration_ms(&self) -> u64 {
        custom_minutes_to_ms(self.duration)
            .unwrap_or(crate::state::DEFAULT_DURATION_MS)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_resolve_to_milliseconds() {
        assert_eq!(preset_duration_ms("5m"), Some(300_000));
        assert_eq!(preset_duration_ms("25m"), Some(1_500_000));
        assert_eq!(preset_duration_ms("60m"), Some(3_600_000));
    }

    #[test]
    fn unknown_preset_is_none() {
        assert_eq!(preset_duration_ms("2h"), None);
        assert_eq!(preset_duration_ms(""), None);
    }

    #[test]
    fn custom_minutes_validate_and_convert() {
        assert_eq!(custom_minutes_to_ms(1), Ok(60_000));
        assert_eq!(custom_minutes_to_ms(90), Ok(5_400_000));
    }

    #[test]
    fn zero_minutes_are_rejected() {
        assert!(custom_minutes_to_ms(0).is_err());
    }

    #[test]
    fn overflowing_minutes_are_rejected() {
        assert!(custom_minutes_to_ms(u64::MAX).is_err());
    }

    #[test]
    fn minutes_beyond_the_arithmetic_range_are_rejected() {
        // Multiplies without overflowing u64 but lands above the i64 range
        // the timer arithmetic works in.
        let minutes = crate::state::MAX_DURATION_MS / MS_PER_MINUTE + 1;
        assert!(custom_minutes_to_ms(minutes).is_err());
        assert!(custom_minutes_to_ms(minutes - 1).is_ok());
    }
}
