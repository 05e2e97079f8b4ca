//! Month grid construction
//!
//! A month is laid out as a flat sequence of cells: one blank per weekday
//! column before the 1st, then one cell per day. Column 0 is Sunday.
//! Consumers slice the sequence into rows of 7.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

/// A calendar month. The month index is 0-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    year: i32,
    month0: u32,
}

impl CalendarMonth {
    /// Build a month from any year/month pair; out-of-range months carry
    /// into the year (month -1 is December of the previous year).
    pub fn new(year: i32, month0: i32) -> Self {
        Self {
            year: year.saturating_add(month0.div_euclid(12)),
            month0: month0.rem_euclid(12) as u32,
        }
    }

    /// Month of the given date
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month0() as i32)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// 0-based month index
    pub fn month0(&self) -> u32 {
        self.month0
    }

    /// 1-based month number, as used in `YYYY-MM-DD` keys
    pub fn month_number(&self) -> u32 {
        self.month0 + 1
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    pub fn next(&self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }

    pub fn prev(&self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.year, self.month0 as i32)
    }

    /// Weekday column (0 = Sunday .. 6 = Saturday) of the 1st
    pub fn first_weekday(&self) -> u32 {
        let days = days_from_civil(self.year as i64, self.month_number(), 1);
        // 1970-01-01 was a Thursday
        (days + 4).rem_euclid(7) as u32
    }

    /// Calendar date of a day in this month, if chrono can represent it
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month_number(), day)
    }

    /// First day of this month and first day of the following one
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.date(1)?, self.next().date(1)?))
    }
}

/// A day cell of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CalendarDay {
    /// Day of month (1..=31)
    pub day_of_month: u32,
    /// Weekday column (0 = Sunday .. 6 = Saturday)
    pub weekday_column: u32,
    /// Number of bookings recorded for this day
    pub booking_count: i64,
}

/// A grid cell; `None` is a leading blank before the 1st
pub type CalendarCell = Option<CalendarDay>;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month (0-based month, normalised like `CalendarMonth::new`)
pub fn days_in_month(year: i32, month0: i32) -> u32 {
    let month = CalendarMonth::new(year, month0);
    match month.month0 {
        1 if is_leap_year(month.year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Build the flat month grid: leading blanks followed by every day of the month.
pub fn build_month_grid(year: i32, month0: i32) -> Vec<CalendarCell> {
    let month = CalendarMonth::new(year, month0);
    let leading = month.first_weekday();
    let days = month.days();

    let mut cells = Vec::with_capacity((leading + days) as usize);
    cells.extend((0..leading).map(|_| None));
    cells.extend((1..=days).map(|day| {
        Some(CalendarDay {
            day_of_month: day,
            weekday_column: (leading + day - 1) % 7,
            booking_count: 0,
        })
    }));
    cells
}

/// Slice a grid into rows of 7; the last row may be shorter.
pub fn weeks(cells: &[CalendarCell]) -> Vec<Vec<CalendarCell>> {
    cells.chunks(7).map(|week| week.to_vec()).collect()
}

// Days since 1970-01-01 in the proleptic Gregorian calendar, valid for any year.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let month_from_march = (month as i64 + 9) % 12;
    let day_of_year = (153 * month_from_march + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}
