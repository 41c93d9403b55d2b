//! API request structures and input validation

use serde::Deserialize;

use crate::{config::custom_minutes_to_ms, state::MAX_DURATION_MS};

/// Body of `POST /timer/duration`: either a minutes value (the custom-input
/// path) or an exact millisecond count.
#[derive(Debug, Clone, Deserialize)]
pub struct SetDurationRequest {
    #[serde(default)]
    pub minutes: Option<u64>,
    #[serde(default)]
    pub duration_ms: Option<u64>,
}

impl SetDurationRequest {
    /// Validate the request and resolve it to milliseconds.
    ///
    /// The timer only ever receives values this has accepted, so both the
    /// positivity precondition and the `MAX_DURATION_MS` ceiling are
    /// enforced entirely here.
    pub fn resolve_duration_ms(&self) -> Result<u64, String> {
        match (self.duration_ms, self.minutes) {
            (Some(0), _) => Err("duration_ms must be positive".to_string()),
            (Some(duration_ms), _) if duration_ms > MAX_DURATION_MS => Err(format!(
                "duration_ms must be at most {}",
                MAX_DURATION_MS
            )),
            (Some(duration_ms), _) => Ok(duration_ms),
            (None, Some(minutes)) => custom_minutes_to_ms(minutes),
            (None, None) => Err("Provide either minutes or duration_ms".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: &str) -> SetDurationRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn resolves_exact_milliseconds() {
        assert_eq!(
            request(r#"{"duration_ms": 1800000}"#).resolve_duration_ms(),
            Ok(1_800_000)
        );
    }

    #[test]
    fn resolves_minutes() {
        assert_eq!(request(r#"{"minutes": 25}"#).resolve_duration_ms(), Ok(1_500_000));
    }

    #[test]
    fn milliseconds_take_precedence_over_minutes() {
        assert_eq!(
            request(r#"{"minutes": 1, "duration_ms": 5000}"#).resolve_duration_ms(),
            Ok(5_000)
        );
    }

    #[test]
    fn rejects_zero_values() {
        assert!(request(r#"{"duration_ms": 0}"#).resolve_duration_ms().is_err());
        assert!(request(r#"{"minutes": 0}"#).resolve_duration_ms().is_err());
    }

    #[test]
    fn rejects_durations_beyond_the_arithmetic_range() {
        // Above i64::MAX the remaining-time subtraction would wrap negative
        // and a never-started timer would report itself overdue.
        let body = format!(r#"{{"duration_ms": {}}}"#, u64::MAX);
        assert!(request(&body).resolve_duration_ms().is_err());

        let at_limit = format!(r#"{{"duration_ms": {}}}"#, i64::MAX);
        assert_eq!(
            request(&at_limit).resolve_duration_ms(),
            Ok(i64::MAX as u64)
        );
    }

    #[test]
    fn rejects_empty_body() {
        assert!(request("{}").resolve_duration_ms().is_err());
    }

    #[test]
    fn negative_values_fail_deserialization() {
        assert!(serde_json::from_str::<SetDurationRequest>(r#"{"minutes": -5}"#).is_err());
    }
}
