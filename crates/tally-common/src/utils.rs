//! Shared utility functions.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Formats a timestamp for display in the given timezone.
///
/// Microseconds are shown only when the timestamp has a fractional part.
pub fn format_timestamp(timestamp: DateTime<Utc>, tz: Tz) -> String {
    let pattern = if timestamp.timestamp_subsec_micros() == 0 {
        "%Y-%m-%d %H:%M:%S%:z"
    } else {
        "%Y-%m-%d %H:%M:%S%.6f%:z"
    };
    tz.from_utc_datetime(&timestamp.naive_utc())
        .format(pattern)
        .to_string()
}

/// Current abbreviation of a timezone, e.g. `EST` or `EDT`.
pub fn timezone_abbreviation(tz: Tz, at: DateTime<Utc>) -> String {
    tz.from_utc_datetime(&at.naive_utc()).format("%Z").to_string()
}

/// Truncates a string to at most `max_chars` characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::New_York;

    #[test]
    fn test_format_timestamp_winter() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(timestamp, New_York), "2024-01-01 07:00:00-05:00");
    }

    #[test]
    fn test_format_timestamp_keeps_milliseconds() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
            + chrono::Duration::milliseconds(250);
        assert_eq!(
            format_timestamp(timestamp, New_York),
            "2024-01-01 07:00:00.250000-05:00"
        );
    }

    #[test]
    fn test_format_timestamp_summer() {
        let timestamp = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(timestamp, New_York), "2024-07-01 08:00:00-04:00");
    }

    #[test]
    fn test_timezone_abbreviation() {
        let winter = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap();
        assert_eq!(timezone_abbreviation(New_York, winter), "EST");
        assert_eq!(timezone_abbreviation(New_York, summer), "EDT");
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        assert_eq!(truncate_string(input, 20), "This is a very lo...");
        assert_eq!(truncate_string("Short", 20), "Short");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let input = "ééééééééééé";
        let truncated = truncate_string(input, 6);
        assert_eq!(truncated, "ééé...");
        assert_eq!(truncated.chars().count(), 6);
    }
}
