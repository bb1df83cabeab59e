//! Formatting utilities

use std::time::Duration;

use glam::Vec3;

/// Format a duration in milliseconds with two decimals
pub fn format_millis(duration: Duration) -> String {
    format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
}

/// Format a throughput as elements per second
pub fn format_rate(count: usize, duration: Duration) -> String {
    let seconds = duration.as_secs_f64();
    if seconds == 0.0 {
        "N/A".to_string()
    } else {
        format!("{:.0}/s", count as f64 / seconds)
    }
}

/// Format a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

/// Format a vector with three decimals per component
pub fn format_vec3(value: Vec3) -> String {
    format!("({:.3}, {:.3}, {:.3})", value.x, value.y, value.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Duration::from_micros(1500)), "1.50 ms");
        assert_eq!(format_millis(Duration::ZERO), "0.00 ms");
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(1000, Duration::from_millis(500)), "2000/s");
        assert_eq!(format_rate(10, Duration::ZERO), "N/A");
    }

    #[test]
    fn test_format_vec3() {
        assert_eq!(format_vec3(Vec3::new(0.5, -1.0, 2.25)), "(0.500, -1.000, 2.250)");
        assert_eq!(format_percentage(12.345), "12.3%");
    }
}
