use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock start time of a slot, stored as minutes from midnight.
///
/// The textual form is `HH:MM` (24-hour); a single-digit hour is accepted on
/// input and zero-padded on output. Ordering is chronological.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotTime {
    minutes: u16,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotTimeParseError {
    #[error("time '{0}' does not match HH:MM")]
    Format(String),
    #[error("hour {0} out of range")]
    Hour(u32),
    #[error("minute {0} out of range")]
    Minute(u32),
}

impl SlotTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, SlotTimeParseError> {
        if hour > 23 {
            return Err(SlotTimeParseError::Hour(hour));
        }
        if minute > 59 {
            return Err(SlotTimeParseError::Minute(minute));
        }
        Ok(Self {
            minutes: (hour * 60 + minute) as u16,
        })
    }

    pub fn hour(self) -> u32 {
        (self.minutes / 60) as u32
    }

    pub fn minute(self) -> u32 {
        (self.minutes % 60) as u32
    }

    pub fn minutes_from_midnight(self) -> u16 {
        self.minutes
    }

    /// Advance by `minutes`, or `None` when the result would leave the day.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<SlotTime> {
        let next = self.minutes.checked_add(minutes)?;
        if next >= MINUTES_PER_DAY {
            return None;
        }
        Some(SlotTime { minutes: next })
    }

    pub fn to_naive_time(self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour(), self.minute(), 0)
            .expect("SlotTime is range-checked on construction")
    }

    /// Combine with a calendar date into the instant the slot begins.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.to_naive_time())
    }
}

impl FromStr for SlotTime {
    type Err = SlotTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (h, m) = s
            .split_once(':')
            .ok_or_else(|| SlotTimeParseError::Format(s.to_string()))?;
        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(SlotTimeParseError::Format(s.to_string()));
        }
        let hour: u32 = h
            .parse()
            .map_err(|_| SlotTimeParseError::Format(s.to_string()))?;
        let minute: u32 = m
            .parse()
            .map_err(|_| SlotTimeParseError::Format(s.to_string()))?;
        Self::new(hour, minute)
    }
}

impl fmt::Display for SlotTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for SlotTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
