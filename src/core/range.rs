use chrono::{
    Datelike, Days, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday,
};
use serde::{Deserialize, Serialize};

/// Calendar granularity of one header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Range {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Range {
    pub const ALL: [Range; 7] = [
        Range::Second,
        Range::Minute,
        Range::Hour,
        Range::Day,
        Range::Week,
        Range::Month,
        Range::Year,
    ];

    /// Truncates `datetime` down to the first instant of its range.
    ///
    /// Week ranges begin at midnight on `week_start`. Sub-second precision is
    /// always dropped. The result never exceeds `datetime`; near
    /// `NaiveDate::MIN` a week start that cannot be represented clamps to the
    /// start of the day instead.
    #[must_use]
    pub fn truncate(self, datetime: NaiveDateTime, week_start: Weekday) -> NaiveDateTime {
        let date = datetime.date();
        let time = datetime.time();
        match self {
            Range::Second => date.and_time(hms(time.hour(), time.minute(), time.second())),
            Range::Minute => date.and_time(hms(time.hour(), time.minute(), 0)),
            Range::Hour => date.and_time(hms(time.hour(), 0, 0)),
            Range::Day => date.and_time(NaiveTime::MIN),
            Range::Week => {
                let back = days_since_week_start(date.weekday(), week_start);
                date.checked_sub_days(Days::new(u64::from(back)))
                    .unwrap_or(date)
                    .and_time(NaiveTime::MIN)
            }
            Range::Month => first_of_month(date).and_time(NaiveTime::MIN),
            Range::Year => NaiveDate::from_yo_opt(date.year(), 1)
                .unwrap_or(date)
                .and_time(NaiveTime::MIN),
        }
    }

    /// Moves a range begin forward by exactly one unit.
    ///
    /// Month and year steps are calendar-aware. Returns `None` past chrono's
    /// representable range.
    #[must_use]
    pub fn advance(self, begin: NaiveDateTime) -> Option<NaiveDateTime> {
        match self {
            Range::Second => begin.checked_add_signed(TimeDelta::try_seconds(1)?),
            Range::Minute => begin.checked_add_signed(TimeDelta::try_minutes(1)?),
            Range::Hour => begin.checked_add_signed(TimeDelta::try_hours(1)?),
            Range::Day => begin.checked_add_days(Days::new(1)),
            Range::Week => begin.checked_add_days(Days::new(7)),
            Range::Month => begin.checked_add_months(Months::new(1)),
            Range::Year => begin.checked_add_months(Months::new(12)),
        }
    }

    /// Nominal length in days, used to estimate cell widths.
    #[must_use]
    pub fn approximate_days(self) -> f64 {
        match self {
            Range::Second => 1.0 / 86_400.0,
            Range::Minute => 1.0 / 1_440.0,
            Range::Hour => 1.0 / 24.0,
            Range::Day => 1.0,
            Range::Week => 7.0,
            Range::Month => 30.436_875,
            Range::Year => 365.242_5,
        }
    }
}

pub(crate) fn days_since_week_start(day: Weekday, week_start: Weekday) -> u32 {
    (day.num_days_from_monday() + 7 - week_start.num_days_from_monday()) % 7
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn hms(hour: u32, minute: u32, second: u32) -> NaiveTime {
    // Components come from an existing NaiveTime, so they are always in range.
    NaiveTime::from_hms_opt(hour, minute, second).unwrap_or(NaiveTime::MIN)
}
