//! Centralized number formatting utilities.
//!
//! All numeric display formatting goes through this module so front-end
//! consumers (the sim harness, future overlays) render values consistently.

/// Format a large number with K/M suffix for compact display.
///
/// - Values >= 1,000,000 are formatted as `X.XXM`
/// - Values >= 1,000 are formatted as `X.XXK`
/// - Values below 1,000 are formatted as-is
///
/// # Examples
/// ```
/// use kolto_types::formatting::format_compact;
/// assert_eq!(format_compact(500), "500");
/// assert_eq!(format_compact(1_500), "1.50K");
/// assert_eq!(format_compact(1_500_000), "1.50M");
/// ```
pub fn format_compact(n: i64) -> String {
    if n >= 1_000_000 {
        format!("{:.2}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{:.2}K", n as f64 / 1_000.0)
    } else {
        format!("{}", n)
    }
}

/// Format a duration in seconds as `M:SS`.
///
/// # Examples
/// ```
/// use kolto_types::formatting::format_duration;
/// assert_eq!(format_duration(0.0), "0:00");
/// assert_eq!(format_duration(9.4), "0:09");
/// assert_eq!(format_duration(225.0), "3:45");
/// ```
pub fn format_duration(secs: f32) -> String {
    let total = secs.max(0.0) as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Format a fraction in [0.0, 1.0] as a percentage with one decimal.
///
/// # Examples
/// ```
/// use kolto_types::formatting::format_percent;
/// assert_eq!(format_percent(0.0), "0.0%");
/// assert_eq!(format_percent(0.357), "35.7%");
/// assert_eq!(format_percent(1.0), "100.0%");
/// ```
pub fn format_percent(fraction: f32) -> String {
    format!("{:.1}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_compact_boundaries() {
        assert_eq!(format_compact(999), "999");
        assert_eq!(format_compact(1_000), "1.00K");
        assert_eq!(format_compact(999_999), "1000.00K");
        assert_eq!(format_compact(1_000_000), "1.00M");
    }

    #[test]
    fn test_format_duration_rounds_down() {
        assert_eq!(format_duration(59.9), "0:59");
        assert_eq!(format_duration(60.0), "1:00");
        assert_eq!(format_duration(-3.0), "0:00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.005), "0.5%");
    }
}
