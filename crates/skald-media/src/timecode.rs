//! `HH:MM:SS` display formatting for second offsets.

/// Format a second offset as `HH:MM:SS`, each field zero-padded to two
/// digits. Hours grow past two digits for inputs beyond 100 hours.
pub fn format_timecode(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let h = total / 3600;
    let m = (total % 3600) / 60;
    let s = total % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hours_minutes_seconds() {
        assert_eq!(format_timecode(3661.0), "01:01:01");
    }

    #[test]
    fn formats_sub_minute_values() {
        assert_eq!(format_timecode(59.0), "00:00:59");
        assert_eq!(format_timecode(0.0), "00:00:00");
    }

    #[test]
    fn fractional_seconds_floor() {
        assert_eq!(format_timecode(61.9), "00:01:01");
    }

    #[test]
    fn hours_exceeding_one_day() {
        // 30h 0m 5s
        assert_eq!(format_timecode(30.0 * 3600.0 + 5.0), "30:00:05");
    }
}
