use derive_more::{Add, AddAssign, Deref, From, Into, Mul};
use std::fmt;

const SECONDS_IN_MINUTE: u64 = 60;
const MINUTES_IN_HOUR: u64 = 60;
const SECONDS_IN_HOUR: u64 = MINUTES_IN_HOUR * SECONDS_IN_MINUTE;
const HOURS_IN_DAY: u64 = 24;
const SECONDS_IN_DAY: u64 = HOURS_IN_DAY * SECONDS_IN_HOUR;

// Calendar units as the formatter counts them.  A "month" is 30 days
// and a "year" is 365 days; nothing here knows about real calendars.
const HOURS_IN_WEEK: u64 = 7 * HOURS_IN_DAY;
const HOURS_IN_MONTH: u64 = 30 * HOURS_IN_DAY;
const HOURS_IN_YEAR: u64 = 365 * HOURS_IN_DAY;

const HALF_HOUR: std::time::Duration = std::time::Duration::from_secs(SECONDS_IN_HOUR / 2);

/// An elapsed span of time.
///
/// Thin wrapper around `std::time::Duration` so that the arithmetic
/// and conversions can be derived and the human readable rendering
/// hangs off the type itself.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Add,
    AddAssign,
    Mul,
    Deref,
    From,
    Into,
)]
pub struct Duration(std::time::Duration);

impl Duration {
    pub const fn new(secs: u64, nanos: u32) -> Self {
        Self(std::time::Duration::new(secs, nanos))
    }

    pub const fn from_secs(secs: u64) -> Self {
        Self(std::time::Duration::from_secs(secs))
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self(std::time::Duration::from_millis(millis))
    }

    pub const fn from_mins(mins: u64) -> Self {
        Self::from_secs(mins * SECONDS_IN_MINUTE)
    }

    pub const fn from_hours(hours: u64) -> Self {
        Self::from_secs(hours * SECONDS_IN_HOUR)
    }

    pub const fn from_days(days: u64) -> Self {
        Self::from_secs(days * SECONDS_IN_DAY)
    }

    /// Borrowing adapter that displays the duration the way
    /// [`human_duration`] spells it, e.g. `format!("{:>14}", d.human())`.
    pub fn human(&self) -> Human<'_> {
        Human(self)
    }
}

/// See [`Duration::human`].
#[derive(Copy, Clone, Debug)]
pub struct Human<'a>(&'a Duration);

impl fmt::Display for Human<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&human_duration(*self.0))
    }
}

/// Returns a coarse, human readable description of `d`, such as
/// `"Less than a second"`, `"About an hour"` or `"3 weeks"`.
///
/// Seconds and minutes are truncated.  From an hour on the count is
/// taken from the hours rounded half up, and days, weeks and months
/// are whole divisions of that.  Each unit is kept until the next one
/// up would read "2", so 36 hours stays "36 hours" and 30 days is
/// still "4 weeks".
pub fn human_duration(d: impl Into<std::time::Duration>) -> String {
    let d = d.into();

    let seconds = d.as_secs();
    if seconds < 1 {
        return "Less than a second".to_string();
    }
    if seconds == 1 {
        return "1 second".to_string();
    }
    if seconds < SECONDS_IN_MINUTE {
        return format!("{} seconds", seconds);
    }

    let minutes = seconds / SECONDS_IN_MINUTE;
    if minutes == 1 {
        return "About a minute".to_string();
    }
    if minutes < MINUTES_IN_HOUR {
        return format!("{} minutes", minutes);
    }

    let hours = d.saturating_add(HALF_HOUR).as_secs() / SECONDS_IN_HOUR;
    if hours == 1 {
        "About an hour".to_string()
    } else if hours < 2 * HOURS_IN_DAY {
        format!("{} hours", hours)
    } else if hours < 2 * HOURS_IN_WEEK {
        format!("{} days", hours / HOURS_IN_DAY)
    } else if hours < 2 * HOURS_IN_MONTH {
        format!("{} weeks", hours / HOURS_IN_WEEK)
    } else if hours < 2 * HOURS_IN_YEAR {
        format!("{} months", hours / HOURS_IN_MONTH)
    } else {
        // years ignore the half-hour rounding
        format!("{} years", seconds / SECONDS_IN_HOUR / HOURS_IN_YEAR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_days(1);
    const WEEK: Duration = Duration::from_days(7);
    const MONTH: Duration = Duration::from_days(30);
    const YEAR: Duration = Duration::from_days(365);

    fn mins_secs(mins: u64, secs: u64) -> Duration {
        Duration::from_mins(mins) + Duration::from_secs(secs)
    }

    fn hours_mins(hours: u64, mins: u64) -> Duration {
        Duration::from_hours(hours) + Duration::from_mins(mins)
    }

    #[test]
    fn test_seconds() {
        assert_eq!(
            human_duration(Duration::from_millis(450)),
            "Less than a second"
        );
        assert_eq!(
            human_duration(Duration::from_millis(999)),
            "Less than a second"
        );
        assert_eq!(human_duration(Duration::from_secs(1)), "1 second");
        assert_eq!(human_duration(Duration::from_millis(1_999)), "1 second");
        assert_eq!(human_duration(Duration::from_secs(45)), "45 seconds");
        assert_eq!(human_duration(Duration::from_secs(46)), "46 seconds");
        assert_eq!(human_duration(Duration::from_secs(59)), "59 seconds");
    }

    #[test]
    fn test_minutes() {
        assert_eq!(human_duration(Duration::from_secs(60)), "About a minute");
        assert_eq!(human_duration(mins_secs(1, 29)), "About a minute");
        assert_eq!(human_duration(mins_secs(1, 59)), "About a minute");
        assert_eq!(human_duration(Duration::from_mins(3)), "3 minutes");
        assert_eq!(human_duration(Duration::from_mins(35)), "35 minutes");
        assert_eq!(human_duration(mins_secs(35, 40)), "35 minutes");
        assert_eq!(human_duration(Duration::from_mins(45)), "45 minutes");
        assert_eq!(human_duration(mins_secs(45, 40)), "45 minutes");
        assert_eq!(human_duration(Duration::from_mins(46)), "46 minutes");
        assert_eq!(human_duration(Duration::from_mins(59)), "59 minutes");
    }

    #[test]
    fn test_hours() {
        assert_eq!(human_duration(Duration::from_hours(1)), "About an hour");
        assert_eq!(human_duration(hours_mins(1, 29)), "About an hour");
        assert_eq!(human_duration(hours_mins(1, 30)), "2 hours");
        assert_eq!(human_duration(hours_mins(1, 31)), "2 hours");
        assert_eq!(human_duration(hours_mins(1, 59)), "2 hours");
        assert_eq!(human_duration(Duration::from_hours(3)), "3 hours");
        assert_eq!(human_duration(hours_mins(3, 29)), "3 hours");
        assert_eq!(human_duration(hours_mins(3, 31)), "4 hours");
        assert_eq!(human_duration(hours_mins(3, 59)), "4 hours");
        assert_eq!(human_duration(hours_mins(3, 60)), "4 hours");
        assert_eq!(human_duration(Duration::from_hours(24)), "24 hours");
        assert_eq!(human_duration(DAY + Duration::from_hours(12)), "36 hours");
    }

    #[test]
    fn test_days_and_weeks() {
        assert_eq!(human_duration(DAY * 2_u32), "2 days");
        assert_eq!(human_duration(WEEK), "7 days");
        assert_eq!(
            human_duration(DAY * 13_u32 + Duration::from_hours(5)),
            "13 days"
        );
        assert_eq!(human_duration(WEEK * 2_u32), "2 weeks");
        assert_eq!(human_duration(WEEK * 2_u32 + DAY * 4_u32), "2 weeks");
        assert_eq!(human_duration(WEEK * 3_u32), "3 weeks");
        assert_eq!(human_duration(WEEK * 4_u32), "4 weeks");
        assert_eq!(human_duration(WEEK * 4_u32 + DAY * 3_u32), "4 weeks");
        assert_eq!(human_duration(MONTH), "4 weeks");
        assert_eq!(human_duration(MONTH + WEEK * 2_u32), "6 weeks");
    }

    #[test]
    fn test_months_and_years() {
        assert_eq!(human_duration(MONTH * 2_u32), "2 months");
        assert_eq!(human_duration(MONTH * 2_u32 + WEEK * 2_u32), "2 months");
        assert_eq!(human_duration(MONTH * 3_u32), "3 months");
        assert_eq!(human_duration(MONTH * 3_u32 + WEEK), "3 months");
        assert_eq!(human_duration(MONTH * 5_u32 + WEEK * 2_u32), "5 months");
        assert_eq!(human_duration(MONTH * 13_u32), "13 months");
        assert_eq!(human_duration(MONTH * 23_u32), "23 months");
        assert_eq!(human_duration(MONTH * 24_u32), "24 months");
        assert_eq!(human_duration(MONTH * 24_u32 + WEEK * 2_u32), "2 years");
        assert_eq!(human_duration(YEAR * 3_u32 + MONTH * 2_u32), "3 years");
    }

    #[test]
    fn test_std_duration_accepted() {
        assert_eq!(
            human_duration(std::time::Duration::from_secs(47)),
            "47 seconds"
        );
        assert!(human_duration(std::time::Duration::MAX).ends_with(" years"));
    }

    #[test]
    fn test_human_display() {
        let d = hours_mins(1, 45);
        assert_eq!(format!("{}", d.human()), "2 hours");
        assert_eq!(format!("{:>9}", d.human()), "  2 hours");
        assert_eq!(format!("{:<9}|", d.human()), "2 hours  |");
    }

    #[test]
    fn test_arithmetic() {
        let mut d = Duration::from_mins(59);
        assert_eq!(human_duration(d), "59 minutes");
        d += Duration::from_mins(1);
        assert_eq!(d, Duration::from_hours(1));
        let inner: std::time::Duration = d.into();
        assert_eq!(inner.as_secs(), 3600);
        assert_eq!(Duration::from(inner), d);
    }
}
