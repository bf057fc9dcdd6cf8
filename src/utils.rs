use std::time::{Duration, Instant};

/// Seconds elapsed between two instants, for the profiling log lines.
pub fn get_duration(start: Instant, end: Instant) -> f64 {
    let duration: Duration = end.duration_since(start);
    duration.as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_is_non_negative() {
        let start = Instant::now();
        let end = start + Duration::from_millis(1500);
        assert!((get_duration(start, end) - 1.5).abs() < 1e-9);
        assert_eq!(get_duration(end, start), 0.0);
    }
}
