//! Schedule timestamps.
//!
//! Schedules carry times as integer milliseconds since the Unix epoch.
//! No time-zone handling is done: every timestamp is an instant.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::fmt;

/// An instant in milliseconds since the Unix epoch.
///
/// Any `i64` is accepted. Values that fall outside chrono's calendar range
/// are still ordered and subtracted correctly; they just display as the
/// raw integer.
///
/// # Examples
///
/// ```
/// use plan_server::domain::Timestamp;
///
/// let t = Timestamp::from_millis(1564561265346);
/// assert_eq!(t.to_string(), "2019-07-31T08:21:05.346Z");
/// assert_eq!(Timestamp::from_millis(i64::MAX).to_string(), i64::MAX.to_string());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from epoch milliseconds.
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the epoch milliseconds.
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Returns the instant as a UTC datetime, if chrono can represent it.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// Duration from `self` until `later`.
    ///
    /// Returns `None` if the difference overflows.
    pub fn duration_until(&self, later: Timestamp) -> Option<Duration> {
        later
            .0
            .checked_sub(self.0)
            .and_then(Duration::try_milliseconds)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => write!(f, "{}", self.0),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_roundtrip() {
        let t = Timestamp::from_millis(1564583044545);
        assert_eq!(t.as_millis(), 1564583044545);
        assert_eq!(Timestamp::from(42), Timestamp::from_millis(42));
    }

    #[test]
    fn ordering_follows_millis() {
        assert!(Timestamp::from_millis(100) < Timestamp::from_millis(200));
        assert!(Timestamp::from_millis(-5) < Timestamp::from_millis(0));
    }

    #[test]
    fn duration_until_later() {
        let dep = Timestamp::from_millis(100);
        let arr = Timestamp::from_millis(380);
        assert_eq!(dep.duration_until(arr), Some(Duration::milliseconds(280)));
        assert_eq!(arr.duration_until(dep), Some(Duration::milliseconds(-280)));
    }

    #[test]
    fn duration_until_overflow() {
        let dep = Timestamp::from_millis(i64::MIN);
        let arr = Timestamp::from_millis(i64::MAX);
        assert_eq!(dep.duration_until(arr), None);
    }

    #[test]
    fn display_rfc3339() {
        assert_eq!(Timestamp::from_millis(0).to_string(), "1970-01-01T00:00:00.000Z");
        assert_eq!(
            Timestamp::from_millis(1564561265346).to_string(),
            "2019-07-31T08:21:05.346Z"
        );
    }

    #[test]
    fn display_out_of_range_falls_back_to_millis() {
        let t = Timestamp::from_millis(i64::MIN);
        assert!(t.to_utc().is_none());
        assert_eq!(t.to_string(), i64::MIN.to_string());
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", Timestamp::from_millis(7)), "Timestamp(7)");
    }
}
