//! Time formatting helpers.

/// Format a duration in milliseconds to a human-readable string.
pub fn format_duration_millis(millis: u64) -> String {
    let secs = millis / 1000;
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs < 86400 {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}d {}h", secs / 86400, (secs % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_each_magnitude() {
        assert_eq!(format_duration_millis(999), "0s");
        assert_eq!(format_duration_millis(61_000), "1m 1s");
        assert_eq!(format_duration_millis(3_660_000), "1h 1m");
        assert_eq!(format_duration_millis(21 * 86_400_000 + 7_200_000), "21d 2h");
    }
}
