use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Format of slot labels, e.g. "10:00 AM"
pub const SLOT_FORMAT: &str = "%I:%M %p";

/// Coarse time-of-day grouping of bookable slots
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TimeSession {
    Morning,
    Afternoon,
    Evening,
}

impl TimeSession {
    pub const ALL: [TimeSession; 3] = [Self::Morning, Self::Afternoon, Self::Evening];

    pub fn slots(self) -> &'static [&'static str] {
        match self {
            Self::Morning => &["09:00 AM", "09:30 AM", "10:00 AM", "10:30 AM", "11:00 AM", "11:30 AM"],
            Self::Afternoon => &["12:00 PM", "12:30 PM", "02:00 PM", "02:30 PM", "03:00 PM", "03:30 PM"],
            Self::Evening => &["05:00 PM", "05:30 PM", "06:00 PM", "06:30 PM", "07:00 PM", "07:30 PM"],
        }
    }

    pub fn has_slot(self, time: &str) -> bool {
        self.slots().contains(&time)
    }
}

impl fmt::Display for TimeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Morning => write!(f, "morning"),
            Self::Afternoon => write!(f, "afternoon"),
            Self::Evening => write!(f, "evening"),
        }
    }
}

pub fn parse_slot(time: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(time.trim(), SLOT_FORMAT).ok()
}

/// Local instant of a date plus a slot label
pub fn appointment_instant(date: NaiveDate, time: &str) -> Option<NaiveDateTime> {
    parse_slot(time).map(|t| date.and_time(t))
}

/// Dates before today's local midnight cannot be booked
pub fn is_bookable(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub disabled: bool,
    pub today: bool,
}

/// Sunday-first month grid; cells outside the month are `None`
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
}

impl CalendarMonth {
    pub fn new(year: i32, month: u32, today: NaiveDate) -> Result<Self, Error> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::validation(format!("Invalid month {year}-{month}")))?;

        let mut cells: Vec<Option<CalendarDay>> =
            vec![None; first.weekday().num_days_from_sunday() as usize];

        let mut date = first;
        while date.month() == month {
            cells.push(Some(CalendarDay {
                date,
                disabled: !is_bookable(date, today),
                today: date == today,
            }));
            date += Duration::days(1);
        }

        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        Ok(Self {
            year,
            month,
            weeks: cells.chunks(7).map(<[_]>::to_vec).collect(),
        })
    }

    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten().flatten()
    }

    /// Month shown by the "previous" arrow
    pub fn previous(&self) -> (i32, u32) {
        if self.month == 1 {
            (self.year - 1, 12)
        } else {
            (self.year, self.month - 1)
        }
    }

    /// Month shown by the "next" arrow
    pub fn next(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }
}
