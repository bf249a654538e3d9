//! # Timestamp Value Object
//!
//! DateTime wrapper used for creation and join times.
//!
//! # Examples
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use waitlist::domain::value_objects::timestamp::Timestamp;
//!
//! let joined = Timestamp::now();
//! let stored: DateTime<Utc> = joined.into();
//!
//! assert_eq!(Timestamp::from(stored), joined);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC timestamp.
///
/// Wraps `chrono::DateTime<Utc>`; always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn now_creates_current_time() {
        let before = Utc::now();
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.0 >= before);
        assert!(ts.0 <= after);
    }

    #[test]
    fn datetime_roundtrip() {
        let dt = Utc::now();
        let ts: Timestamp = dt.into();
        let back: DateTime<Utc> = ts.into();
        assert_eq!(back, dt);
    }

    #[test]
    fn display_is_rfc3339() {
        let ts = Timestamp::from(Utc.timestamp_opt(1_704_067_200, 0).unwrap());
        assert_eq!(ts.to_string(), "2024-01-01T00:00:00+00:00");
    }
}
