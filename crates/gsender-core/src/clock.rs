//! Modification-time helpers.

use chrono::Utc;

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Next modification time for a record last modified at `previous`.
///
/// Always strictly greater than `previous`, even when two mutations land
/// within the same millisecond.
pub fn next_mtime(previous: i64) -> i64 {
    now_millis().max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_mtime_strictly_increases() {
        let far_future = now_millis() + 60_000;
        assert_eq!(next_mtime(far_future), far_future + 1);

        let past = 1_000;
        assert!(next_mtime(past) > past);
    }
}
