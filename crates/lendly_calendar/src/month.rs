//! Month cursor and month grid layout.

use crate::logic::{CalendarError, DateStatus};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A calendar month, used as the "currently displayed month" of a widget.
///
/// Stepping is unbounded; months outside chrono's date range simply have no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// `month` is 1-based. Returns `None` outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year.saturating_add(1),
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month {
            4 | 6 | 9 | 11 => 30,
            2 if is_leap_year(self.year) => 29,
            2 => 28,
            _ => 31,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Days of the month in order. Empty if the month is outside chrono's range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days_in_month()).filter_map(move |day| NaiveDate::from_ymd_opt(self.year, self.month, day))
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl fmt::Display for MonthCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthCursor {
    type Err = CalendarError;

    /// Parses `YYYY-MM`. The year may carry a leading `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidDate(s.to_string());
        let (year, month) = s.trim().rsplit_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        MonthCursor::new(year, month).ok_or_else(invalid)
    }
}

/// One day of a rendered month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub status: DateStatus,
    pub is_today: bool,
    /// Part of the current, unconfirmed selection.
    pub selected: bool,
}

/// A month laid out in week rows. Padding cells before the 1st and after the
/// last day are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub month: MonthCursor,
    pub week_start: Weekday,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthView {
    /// Column headers in display order.
    pub fn weekdays(&self) -> [Weekday; 7] {
        weekday_columns(self.week_start)
    }

    /// All real day cells, in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }
}

pub fn weekday_columns(week_start: Weekday) -> [Weekday; 7] {
    let mut columns = [week_start; 7];
    for i in 1..7 {
        columns[i] = columns[i - 1].succ();
    }
    columns
}

/// Lays out `month` starting weeks on `week_start`, asking `describe` for each day's cell.
pub fn layout_month<F>(month: MonthCursor, week_start: Weekday, describe: F) -> MonthView
where
    F: Fn(NaiveDate) -> DayCell,
{
    let mut weeks = Vec::new();
    let Some(first) = month.first_day() else {
        return MonthView {
            month,
            week_start,
            weeks,
        };
    };

    let offset = (first.weekday().num_days_from_monday() + 7
        - week_start.num_days_from_monday())
        % 7;

    let mut cells: Vec<Option<DayCell>> = vec![None; offset as usize];
    cells.extend(month.days().map(|date| Some(describe(date))));
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    for chunk in cells.chunks(7) {
        let mut week = [None; 7];
        week.copy_from_slice(chunk);
        weeks.push(week);
    }

    MonthView {
        month,
        week_start,
        weeks,
    }
}
