//! Common test fixtures

use chrono::{DateTime, TimeZone, Utc};

/// A deterministic timestamp `n` days after the fixed test epoch
///
/// Statement tests order events by `created_at`; building every event
/// from the same epoch makes that ordering explicit and reproducible.
pub fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + chrono::Duration::days(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_is_monotonic() {
        assert!(day(0) < day(1));
        assert_eq!(day(2) - day(1), chrono::Duration::days(1));
    }
}
