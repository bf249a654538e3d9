//! # Event Date
//!
//! The calendar date that keys an event. One event exists per date.
//!
//! # Examples
//!
//! ```
//! use waitlist::domain::value_objects::EventDate;
//!
//! let date: EventDate = "2024-01-07".parse().unwrap();
//! assert_eq!(date.to_string(), "2024-01-07");
//! assert!("07.01.2024".parse::<EventDate>().is_err());
//! ```

use crate::domain::errors::DomainError;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An ISO calendar date (`YYYY-MM-DD`).
///
/// Ordering is chronological, which matches lexical order of the ISO form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventDate(NaiveDate);

impl EventDate {
    /// ISO calendar date format.
    pub const FORMAT: &'static str = "%Y-%m-%d";

    /// Creates an event date from a calendar date.
    #[inline]
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates an event date from year, month and day.
    ///
    /// Returns `None` for dates that do not exist.
    #[must_use]
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the underlying calendar date.
    #[inline]
    #[must_use]
    pub const fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Returns the day of the week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }
}

impl FromStr for EventDate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), Self::FORMAT)
            .map(Self)
            .map_err(|_| DomainError::invalid_date(s))
    }
}

impl TryFrom<String> for EventDate {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EventDate> for String {
    fn from(date: EventDate) -> Self {
        date.to_string()
    }
}

impl From<NaiveDate> for EventDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}
