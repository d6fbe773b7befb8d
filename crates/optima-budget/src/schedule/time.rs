//! UTC time-of-day values for schedule windows.

use crate::error::{BudgetError, Result};
use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A UTC time of day expressed as minutes since midnight.
///
/// Parsed from and rendered as `HH:MM`. `24:00` is accepted and denotes the end of
/// the day, so a window ending at `24:00` covers the final minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Midnight.
    pub const MIDNIGHT: Self = Self(0);

    /// End of day (`24:00`).
    pub const END_OF_DAY: Self = Self(MINUTES_PER_DAY);

    /// Build from hour and minute.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self> {
        let invalid = |reason: &str| BudgetError::format(&format!("{hour:02}:{minute:02}"), reason);
        if minute > 59 {
            return Err(invalid("minute must be 0-59"));
        }
        match hour {
            0..=23 => Ok(Self(u16::from(hour) * 60 + u16::from(minute))),
            24 if minute == 0 => Ok(Self::END_OF_DAY),
            _ => Err(invalid("hour must be 0-23")),
        }
    }

    /// Minute of day of a UTC instant.
    pub fn of(instant: DateTime<Utc>) -> Self {
        // hour() <= 23 and minute() <= 59, so this always fits
        Self((instant.hour() * 60 + instant.minute()) as u16)
    }

    /// Minutes since midnight.
    pub const fn minutes(self) -> u16 {
        self.0
    }

    /// Hour component.
    pub const fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Minute component.
    pub const fn minute(self) -> u16 {
        self.0 % 60
    }
}

impl FromStr for MinuteOfDay {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (h, m) = trimmed
            .split_once(':')
            .ok_or_else(|| BudgetError::format(s, "expected HH:MM"))?;

        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(BudgetError::format(s, "expected HH:MM"));
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(BudgetError::format(s, "hour and minute must be digits"));
        }

        // Both parts are 1-2 ASCII digits, so parsing cannot overflow a u8
        let hour: u8 = h.parse().map_err(|_| BudgetError::format(s, "bad hour"))?;
        let minute: u8 = m.parse().map_err(|_| BudgetError::format(s, "bad minute"))?;

        Self::from_hm(hour, minute).map_err(|_| {
            BudgetError::format(s, "time must be between 00:00 and 24:00")
        })
    }
}

impl TryFrom<String> for MinuteOfDay {
    type Error = BudgetError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<MinuteOfDay> for String {
    fn from(value: MinuteOfDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}
