//! # Schedule
//!
//! Weekly recurrence of events.
//!
//! Each week a new event is created for the next occurrence of the
//! configured weekday. The trigger fires at `hour:minute` local time on that
//! weekday, and the event it creates is the one a week later.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use waitlist::application::services::ScheduleConfig;
//!
//! let schedule = ScheduleConfig::default(); // Sundays at 21:00
//! let saturday = NaiveDate::from_ymd_opt(2024, 1, 6).unwrap();
//! let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
//!
//! assert_eq!(schedule.next_event_date(saturday).unwrap().to_string(), "2024-01-07");
//! // On the weekday itself the following week is targeted.
//! assert_eq!(schedule.next_event_date(sunday).unwrap().to_string(), "2024-01-14");
//! ```

use crate::domain::value_objects::EventDate;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid schedule settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// Hour outside `0..=23`.
    #[error("schedule hour must be within 0..=23, got {0}")]
    InvalidHour(u32),
    /// Minute outside `0..=59`.
    #[error("schedule minute must be within 0..=59, got {0}")]
    InvalidMinute(u32),
}

/// Weekly trigger settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Day of the week events take place on.
    pub weekday: Weekday,
    /// Hour of the weekly trigger.
    pub hour: u32,
    /// Minute of the weekly trigger.
    pub minute: u32,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday: Weekday::Sun,
            hour: 21,
            minute: 0,
        }
    }
}

impl ScheduleConfig {
    /// Checks hour and minute ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] naming the offending field.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.hour > 23 {
            return Err(ScheduleError::InvalidHour(self.hour));
        }
        if self.minute > 59 {
            return Err(ScheduleError::InvalidMinute(self.minute));
        }
        Ok(())
    }

    fn trigger_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0)
    }

    /// Returns the date of the next event as seen from `today`.
    ///
    /// Always strictly after `today`: on the configured weekday itself the
    /// date a week later is returned.
    ///
    /// Returns `None` only at the end of the supported calendar.
    #[must_use]
    pub fn next_event_date(&self, today: NaiveDate) -> Option<EventDate> {
        let target = i64::from(self.weekday.num_days_from_monday());
        let current = i64::from(today.weekday().num_days_from_monday());
        let mut days_ahead = target - current;
        if days_ahead <= 0 {
            days_ahead += 7;
        }
        let days = u64::try_from(days_ahead).ok()?;
        today.checked_add_days(Days::new(days)).map(EventDate::new)
    }

    /// Returns the first trigger instant strictly after `now`.
    ///
    /// Returns `None` if the settings are out of range or the instant is
    /// past the end of the supported calendar.
    #[must_use]
    pub fn next_run_after(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        let time = self.trigger_time()?;
        (0..=7)
            .filter_map(|offset| now.date().checked_add_days(Days::new(offset)))
            .filter(|date| date.weekday() == self.weekday)
            .map(|date| date.and_time(time))
            .find(|candidate| *candidate > now)
    }
}
