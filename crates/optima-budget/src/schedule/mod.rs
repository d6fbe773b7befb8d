//! Budget schedules - time-windowed overrides of a portfolio's default cap.
//!
//! A schedule is active on a set of UTC weekdays during a half-open time-of-day
//! window `[start, end)`. Windows whose end precedes their start cross midnight;
//! how those are treated is governed by [`OvernightPolicy`].

pub mod days;
pub mod time;

pub use days::DaySet;
pub use time::{MINUTES_PER_DAY, MinuteOfDay};

use crate::error::{Result, check_cap};
use crate::ids::{PortfolioId, ScheduleId};
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to schedules created without one.
pub const UNTITLED_SCHEDULE: &str = "Untitled Schedule";

/// How windows with `end < start` are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvernightPolicy {
    /// The window wraps past midnight: `[start, 24:00)` on a selected day, then
    /// `[00:00, end)` on the following day.
    #[default]
    Wraparound,
    /// Same-day interval only; a window with `end < start` never matches.
    SameDay,
}

/// A time-windowed override of a portfolio's budget cap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSchedule {
    /// Schedule identifier.
    pub id: ScheduleId,

    /// Portfolio this schedule belongs to.
    pub portfolio_id: PortfolioId,

    /// Display name, also used as the reason in change logs.
    pub name: String,

    /// Cap applied while the window is open.
    pub scheduled_budget_cap: f64,

    /// Window start (inclusive), UTC.
    pub start_time_utc: MinuteOfDay,

    /// Window end (exclusive), UTC.
    pub end_time_utc: MinuteOfDay,

    /// Weekdays on which the window opens.
    pub days_of_week: DaySet,

    /// Inactive schedules are never evaluated.
    pub is_active: bool,
}

/// Unvalidated input for creating a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSchedule {
    /// Owning portfolio.
    pub portfolio_id: PortfolioId,
    /// Display name; blank names become [`UNTITLED_SCHEDULE`].
    pub name: String,
    /// Cap applied while the window is open.
    pub scheduled_budget_cap: f64,
    /// Start time, `HH:MM` UTC.
    pub start_time_utc: String,
    /// End time, `HH:MM` UTC.
    pub end_time_utc: String,
    /// Day indices, 0 = Sunday.
    pub days_of_week: Vec<u8>,
}

impl NewSchedule {
    /// Create schedule input.
    pub fn new(
        portfolio_id: impl Into<PortfolioId>,
        name: impl Into<String>,
        scheduled_budget_cap: f64,
        start_time_utc: impl Into<String>,
        end_time_utc: impl Into<String>,
        days_of_week: Vec<u8>,
    ) -> Self {
        Self {
            portfolio_id: portfolio_id.into(),
            name: name.into(),
            scheduled_budget_cap,
            start_time_utc: start_time_utc.into(),
            end_time_utc: end_time_utc.into(),
            days_of_week,
        }
    }
}

impl BudgetSchedule {
    /// Validate input and create an active schedule.
    ///
    /// # Errors
    /// Returns [`BudgetError::InvalidScheduleFormat`](crate::BudgetError) for times that
    /// are not `HH:MM`, `InvalidWeekday` for day indices above 6 and `InvalidBudgetCap`
    /// for negative or non-finite caps.
    pub fn create(id: impl Into<ScheduleId>, input: NewSchedule) -> Result<Self> {
        let name = input.name.trim();
        Ok(Self {
            id: id.into(),
            portfolio_id: input.portfolio_id,
            name: if name.is_empty() {
                UNTITLED_SCHEDULE.to_string()
            } else {
                name.to_string()
            },
            scheduled_budget_cap: check_cap(input.scheduled_budget_cap)?,
            start_time_utc: input.start_time_utc.parse()?,
            end_time_utc: input.end_time_utc.parse()?,
            days_of_week: DaySet::from_indices(input.days_of_week)?,
            is_active: true,
        })
    }

    /// Re-check invariants that deserialization alone does not enforce.
    pub fn validate(&self) -> Result<()> {
        check_cap(self.scheduled_budget_cap).map(|_| ())
    }

    /// Whether the window ends before it starts.
    pub fn is_overnight(&self) -> bool {
        self.end_time_utc < self.start_time_utc
    }

    /// Window length in minutes under the given policy.
    pub fn window_minutes(&self, policy: OvernightPolicy) -> u16 {
        let (start, end) = (self.start_time_utc.minutes(), self.end_time_utc.minutes());
        match (start < end, policy) {
            (true, _) => end - start,
            (false, OvernightPolicy::Wraparound) if start != end => MINUTES_PER_DAY - start + end,
            _ => 0,
        }
    }

    /// Whether the window contains `instant`. Ignores `is_active`.
    pub fn covers(&self, instant: DateTime<Utc>, policy: OvernightPolicy) -> bool {
        let minute = MinuteOfDay::of(instant);
        let weekday = instant.weekday();
        let (start, end) = (self.start_time_utc, self.end_time_utc);

        if start < end {
            return self.days_of_week.contains(weekday) && start <= minute && minute < end;
        }
        if start == end || policy == OvernightPolicy::SameDay {
            return false;
        }

        // Evening part belongs to today, early-morning part to the day the window opened.
        (minute >= start && self.days_of_week.contains(weekday))
            || (minute < end && self.days_of_week.contains(weekday.pred()))
    }
}

impl fmt::Display for BudgetSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}-{} UTC, {}): ${}",
            self.name,
            self.start_time_utc,
            self.end_time_utc,
            self.days_of_week,
            self.scheduled_budget_cap
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BudgetError;
    use chrono::TimeZone;
    use rstest::rstest;

    fn schedule(start: &str, end: &str, days: Vec<u8>) -> BudgetSchedule {
        BudgetSchedule::create("s1", NewSchedule::new("p1", "Window", 800.0, start, end, days))
            .unwrap()
    }

    // 2024-01-03 is a Wednesday
    fn wed(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 3, hour, minute, 0).unwrap()
    }

    #[test]
    fn test_create_defaults() {
        let s = BudgetSchedule::create(
            "s9",
            NewSchedule::new("p1", "   ", 100.0, "09:00", "17:00", vec![5, 1, 1]),
        )
        .unwrap();

        assert_eq!(s.name, UNTITLED_SCHEDULE);
        assert!(s.is_active);
        assert_eq!(s.days_of_week.indices().collect::<Vec<_>>(), vec![1, 5]);
    }

    #[test]
    fn test_create_rejects_bad_input() {
        let bad_time = NewSchedule::new("p1", "x", 100.0, "9am", "17:00", vec![1]);
        assert!(matches!(
            BudgetSchedule::create("s1", bad_time),
            Err(BudgetError::InvalidScheduleFormat { .. })
        ));

        let bad_day = NewSchedule::new("p1", "x", 100.0, "09:00", "17:00", vec![9]);
        assert_eq!(
            BudgetSchedule::create("s1", bad_day),
            Err(BudgetError::InvalidWeekday(9))
        );

        let bad_cap = NewSchedule::new("p1", "x", -5.0, "09:00", "17:00", vec![1]);
        assert_eq!(
            BudgetSchedule::create("s1", bad_cap),
            Err(BudgetError::InvalidBudgetCap(-5.0))
        );
    }

    #[rstest]
    #[case(9, 0, true)]
    #[case(16, 59, true)]
    #[case(17, 0, false)]
    #[case(8, 59, false)]
    fn test_half_open_window(#[case] hour: u32, #[case] minute: u32, #[case] expected: bool) {
        let s = schedule("09:00", "17:00", vec![3]);
        assert_eq!(s.covers(wed(hour, minute), OvernightPolicy::default()), expected);
    }

    #[test]
    fn test_wrong_day() {
        let s = schedule("09:00", "17:00", vec![1, 2]);
        assert!(!s.covers(wed(10, 0), OvernightPolicy::default()));
    }

    #[rstest]
    #[case(22, 0, true)]
    #[case(23, 59, true)]
    #[case(0, 0, true)]
    #[case(1, 59, true)]
    #[case(2, 0, false)]
    #[case(21, 59, false)]
    #[case(12, 0, false)]
    fn test_overnight_wraparound(#[case] hour: u32, #[case] minute: u32, #[case] expected: bool) {
        let s = schedule("22:00", "02:00", (0..7).collect());
        assert!(s.is_overnight());
        assert_eq!(s.covers(wed(hour, minute), OvernightPolicy::Wraparound), expected);
    }

    #[test]
    fn test_overnight_same_day_never_matches() {
        let s = schedule("22:00", "02:00", (0..7).collect());
        for hour in 0..24 {
            assert!(!s.covers(wed(hour, 30), OvernightPolicy::SameDay));
        }
    }

    #[test]
    fn test_overnight_morning_belongs_to_previous_day() {
        // Tuesday night only
        let s = schedule("22:00", "02:00", vec![2]);
        assert!(s.covers(Utc.with_ymd_and_hms(2024, 1, 2, 23, 0, 0).unwrap(), OvernightPolicy::Wraparound));
        assert!(s.covers(wed(1, 0), OvernightPolicy::Wraparound));
        assert!(!s.covers(wed(23, 0), OvernightPolicy::Wraparound));
        assert!(!s.covers(Utc.with_ymd_and_hms(2024, 1, 2, 1, 0, 0).unwrap(), OvernightPolicy::Wraparound));
    }

    #[test]
    fn test_saturday_night_wraps_into_sunday() {
        let s = schedule("23:00", "01:00", vec![6]);
        // 2024-01-07 is a Sunday
        let sunday = Utc.with_ymd_and_hms(2024, 1, 7, 0, 30, 0).unwrap();
        assert!(s.covers(sunday, OvernightPolicy::Wraparound));
    }

    #[test]
    fn test_empty_window() {
        let s = schedule("10:00", "10:00", (0..7).collect());
        assert!(!s.covers(wed(10, 0), OvernightPolicy::Wraparound));
        assert_eq!(s.window_minutes(OvernightPolicy::Wraparound), 0);
    }

    #[test]
    fn test_end_of_day_window() {
        let s = schedule("00:00", "24:00", vec![3]);
        assert!(s.covers(wed(23, 59), OvernightPolicy::default()));
        assert_eq!(s.window_minutes(OvernightPolicy::default()), 1440);
    }

    #[test]
    fn test_window_minutes() {
        assert_eq!(schedule("13:00", "17:00", vec![1]).window_minutes(OvernightPolicy::Wraparound), 240);
        assert_eq!(schedule("22:00", "02:00", vec![1]).window_minutes(OvernightPolicy::Wraparound), 240);
        assert_eq!(schedule("22:00", "02:00", vec![1]).window_minutes(OvernightPolicy::SameDay), 0);
    }

    #[test]
    fn test_json_shape() {
        let json = r#"{
            "id": "s1",
            "portfolioId": "p1",
            "name": "Morning Rush Boost",
            "scheduledBudgetCap": 1000,
            "startTimeUtc": "13:00",
            "endTimeUtc": "17:00",
            "daysOfWeek": [1, 2, 3, 4, 5],
            "isActive": true
        }"#;
        let s: BudgetSchedule = serde_json::from_str(json).unwrap();
        assert_eq!(s.days_of_week, DaySet::WEEKDAYS);
        assert_eq!(s.start_time_utc.minutes(), 780);

        let bad = json.replace("\"13:00\"", "\"1300\"");
        assert!(serde_json::from_str::<BudgetSchedule>(&bad).is_err());
    }

    #[test]
    fn test_display() {
        let s = schedule("13:00", "17:00", vec![1, 2, 3, 4, 5]);
        assert_eq!(s.to_string(), "Window (13:00-17:00 UTC, Mon-Fri): $800");
    }
}
