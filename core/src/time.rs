//! Time related utils.

use std::time::SystemTime;

use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now.
pub fn now() -> DateTime {
    Utc::now()
}

/// Convert a system time into a datetime.
pub fn from_system_time(t: SystemTime) -> DateTime {
    t.into()
}

/// Convert a (possibly fractional) unix timestamp in seconds into a datetime.
///
/// Returns `None` for non-finite values and values chrono can't represent.
pub fn from_timestamp_secs_f64(secs: f64) -> Option<DateTime> {
    if !secs.is_finite() {
        return None;
    }

    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    if whole < i64::MIN as f64 || whole > i64::MAX as f64 {
        return None;
    }
    chrono::DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
}
