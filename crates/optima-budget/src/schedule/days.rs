//! Days-of-week sets for schedule windows.

use crate::error::{BudgetError, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

const SHORT_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// A set of weekdays, indexed 0 = Sunday through 6 = Saturday.
///
/// Serialized as a sorted array of day indices (`[1, 2, 3, 4, 5]`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DaySet(u8);

impl DaySet {
    /// No days.
    pub const EMPTY: Self = Self(0);

    /// All seven days.
    pub const EVERY_DAY: Self = Self(0b111_1111);

    /// Monday through Friday.
    pub const WEEKDAYS: Self = Self(0b011_1110);

    /// Saturday and Sunday.
    pub const WEEKEND: Self = Self(0b100_0001);

    /// Build from day indices; duplicates are ignored.
    pub fn from_indices<I: IntoIterator<Item = u8>>(days: I) -> Result<Self> {
        days.into_iter().try_fold(Self::EMPTY, |set, day| {
            if day > 6 {
                Err(BudgetError::InvalidWeekday(day))
            } else {
                Ok(Self(set.0 | (1 << day)))
            }
        })
    }

    /// Whether the set contains a chrono weekday.
    pub fn contains(self, day: Weekday) -> bool {
        self.contains_index(day.num_days_from_sunday() as u8)
    }

    /// Whether the set contains a day index (0 = Sunday).
    pub const fn contains_index(self, day: u8) -> bool {
        day <= 6 && self.0 & (1 << day) != 0
    }

    /// Add a weekday.
    pub fn with(self, day: Weekday) -> Self {
        Self(self.0 | (1 << day.num_days_from_sunday()))
    }

    /// Whether no day is selected.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of selected days.
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Selected day indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = u8> {
        (0..7u8).filter(move |&d| self.contains_index(d))
    }
}

impl TryFrom<Vec<u8>> for DaySet {
    type Error = BudgetError;

    fn try_from(value: Vec<u8>) -> Result<Self> {
        Self::from_indices(value)
    }
}

impl From<DaySet> for Vec<u8> {
    fn from(value: DaySet) -> Self {
        value.indices().collect()
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::EVERY_DAY => return write!(f, "Every day"),
            Self::WEEKDAYS => return write!(f, "Mon-Fri"),
            Self::WEEKEND => return write!(f, "Weekends"),
            _ => {}
        }
        let names: Vec<&str> = self.indices().map(|d| SHORT_NAMES[d as usize]).collect();
        write!(f, "{}", names.join(", "))
    }
}
