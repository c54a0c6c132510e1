use std::time::Instant;

/// Run `operation` and return its result with the elapsed wall time in milliseconds.
///
/// Fallible operations are measured as a whole; callers propagate the error
/// and drop the timing.
pub fn measure<T, F>(operation: F) -> (T, f64)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let result = operation();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_measure_returns_result() {
        let (value, elapsed) = measure(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn test_measure_counts_sleep() {
        let ((), elapsed) = measure(|| std::thread::sleep(Duration::from_millis(5)));
        assert!(elapsed >= 5.0, "elapsed was {elapsed}");
    }

    #[test]
    fn test_measure_passes_errors_through() {
        let (result, _) = measure(|| "x".parse::<u32>());
        assert!(result.is_err());
    }
}
