//! Timestamp formatting for table cells, chart ticks and stat tiles.
//!
//! The backend serializes naive UTC datetimes (`isoformat()`, no zone
//! suffix); everything here is string-shaped on that assumption and
//! passes malformed input through unchanged.

use chrono::NaiveDateTime;

/// `"2024-03-15T14:02:26.123456"` -> `"2024-03-15 14:02:26"`.
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        let time = time_part.split('.').next().unwrap_or(time_part);
        let time = time.trim_end_matches('Z');
        return format!("{} {}", date_part, time);
    }
    datetime_str.to_string()
}

/// `"2024-03-15T14:02:26"` -> `"14:02"`, for chart axis ticks.
pub fn format_time_short(datetime_str: &str) -> String {
    if let Some((_, time_part)) = datetime_str.split_once('T') {
        let hhmm: String = time_part.chars().take(5).collect();
        if hhmm.len() == 5 {
            return hhmm;
        }
    }
    datetime_str.to_string()
}

/// `"2024-03-15T14:02:26"` -> `"Mar 15, 14:02"`, for the last-alert tile.
pub fn format_compact(datetime_str: &str) -> String {
    let trimmed = datetime_str
        .split('.')
        .next()
        .unwrap_or(datetime_str)
        .trim_end_matches('Z');
    match NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        Ok(dt) => dt.format("%b %-d, %H:%M").to_string(),
        Err(_) => datetime_str.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123456"),
            "2024-03-15 14:02:26"
        );
        assert_eq!(
            format_datetime("2024-12-31T23:59:59Z"),
            "2024-12-31 23:59:59"
        );
    }

    #[test]
    fn test_format_time_short() {
        assert_eq!(format_time_short("2024-03-15T14:02:26"), "14:02");
        assert_eq!(format_time_short("2024-03-15T09:05:00.42"), "09:05");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact("2024-03-15T14:02:26.123456"), "Mar 15, 14:02");
        assert_eq!(format_compact("2024-12-01T08:30:00"), "Dec 1, 08:30");
    }

    #[test]
    fn test_invalid_input_passes_through() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_time_short("invalid"), "invalid");
        assert_eq!(format_compact("invalid"), "invalid");
    }
}
