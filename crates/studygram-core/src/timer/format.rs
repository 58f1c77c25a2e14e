//! Display helpers for the timer widget and dashboard.

/// Render seconds as `M:SS` (minutes unpadded, seconds always two digits).
pub fn format_remaining(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Inverse of [`format_remaining`]. Rejects seconds fields that are not
/// exactly two digits below 60.
pub fn parse_remaining(text: &str) -> Option<u64> {
    let (minutes, seconds) = text.trim().split_once(':')?;
    if seconds.len() != 2 {
        return None;
    }
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    minutes.checked_mul(60)?.checked_add(seconds)
}

/// Render accumulated study minutes as `Hh Mm`.
pub fn format_study_time(minutes: u32) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_remaining(90), "1:30");
        assert_eq!(format_remaining(5), "0:05");
        assert_eq!(format_remaining(0), "0:00");
        assert_eq!(format_remaining(1500), "25:00");
        assert_eq!(format_remaining(5999), "99:59");
    }

    #[test]
    fn parse_rejects_malformed_text() {
        assert_eq!(parse_remaining("1:30"), Some(90));
        assert_eq!(parse_remaining("1:3"), None);
        assert_eq!(parse_remaining("1:60"), None);
        assert_eq!(parse_remaining("130"), None);
        assert_eq!(parse_remaining("a:bc"), None);
    }

    #[test]
    fn study_time_splits_hours() {
        assert_eq!(format_study_time(240), "4h 0m");
        assert_eq!(format_study_time(75), "1h 15m");
    }
}
