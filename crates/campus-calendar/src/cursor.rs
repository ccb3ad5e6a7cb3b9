//! The displayed month and month arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, Months, NaiveDate};

use crate::format::month_name;

/// Direction for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// The (year, month) pair whose grid is displayed. Months are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarCursor {
    first: NaiveDate,
}

impl CalendarCursor {
    /// Cursor for `year`/`month`, or `None` when the month is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    /// Cursor for the month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date - chrono::Duration::days(i64::from(date.day0())),
        }
    }

    /// Cursor for the current local month.
    pub fn today() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    /// Day 1 of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    /// Date for `day` of this month, if that day exists.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first.with_day(day)
    }

    /// Number of days in the month, following Gregorian leap-year rules.
    pub fn days_in_month(&self) -> u32 {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            // Only the last representable month has no successor; it is a December.
            .map_or(31, |last| last.day())
    }

    /// Weekday of day 1, Sunday = 0 through Saturday = 6.
    pub fn first_weekday_offset(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }

    /// Cursor one month before or after this one, rolling the year over.
    ///
    /// At the edges of the representable date range the cursor stays put.
    #[must_use]
    pub fn navigate(self, direction: Direction) -> Self {
        let shifted = match direction {
            Direction::Previous => self.first.checked_sub_months(Months::new(1)),
            Direction::Next => self.first.checked_add_months(Months::new(1)),
        };
        match shifted {
            Some(first) => Self { first },
            None => {
                tracing::warn!("Cannot move {:?} from {}", direction, self);
                self
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", month_name(self.month()), self.year())
    }
}

/// Parses `YYYY-MM`.
impl FromStr for CalendarCursor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got {:?}", s))?;
        let year: i32 = year
            .parse()
            .map_err(|_| format!("invalid year in {:?}", s))?;
        let month: u32 = month
            .parse()
            .map_err(|_| format!("invalid month in {:?}", s))?;
        Self::new(year, month).ok_or_else(|| format!("month out of range in {:?}", s))
    }
}
