//! Time display formatting

/// Render a millisecond count as zero-padded `HH:MM:SS`.
///
/// Uses the absolute value and prefixes `-` for negative input, so overdue
/// readings render as e.g. `-00:00:05`. Hours grow past two digits rather
/// than wrapping. Total over all of `i64`.
pub fn format_hms(ms: i64) -> String {
    let sign = if ms < 0 { "-" } else { "" };
    let total_seconds = ms.unsigned_abs() / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
}
