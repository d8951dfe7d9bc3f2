//! Common display utilities and helpers

use chrono::DateTime;

/// Placeholder for absent values
pub const DASH: &str = "--";

/// Truncate string to max length (in characters) with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Owned value or `--`
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => DASH.to_string(),
    }
}

/// Format epoch milliseconds as `YYYY-MM-DD HH:MM:SS UTC`
pub fn format_millis(millis: Option<i64>) -> String {
    millis
        .filter(|ms| *ms > 0)
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| DASH.to_string())
}
