//! Booking calendar month view

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::calendar::{annotate, build_month_grid, weeks, BookingDensity, CalendarDay, CalendarMonth};

/// A month reference for prev/next navigation (1-based month)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl From<CalendarMonth> for MonthRef {
    fn from(month: CalendarMonth) -> Self {
        Self {
            year: month.year(),
            month: month.month_number(),
        }
    }
}

/// A month of the booking calendar, in rows of 7 starting on Sunday
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MonthView {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub month_name: String,
    /// Rows of 7 cells; `null` cells are leading blanks
    pub weeks: Vec<Vec<Option<CalendarDay>>>,
    pub total_bookings: i64,
    pub prev: MonthRef,
    pub next: MonthRef,
}

impl MonthView {
    pub fn build(month: CalendarMonth, density: &BookingDensity) -> Self {
        let mut cells = build_month_grid(month.year(), month.month0() as i32);
        annotate(&month, &mut cells, density);
        let total_bookings = cells.iter().flatten().map(|d| d.booking_count).sum();

        Self {
            year: month.year(),
            month: month.month_number(),
            month_name: month.name().to_string(),
            weeks: weeks(&cells),
            total_bookings,
            prev: month.prev().into(),
            next: month.next().into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::density_map;
    use chrono::NaiveDate;

    #[test]
    fn test_december_view() {
        let density = density_map([
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
        ]);
        let view = MonthView::build(CalendarMonth::new(2024, 11), &density);

        assert_eq!(view.month, 12);
        assert_eq!(view.month_name, "December");
        assert_eq!(view.total_bookings, 3);
        assert_eq!(view.next, MonthRef { year: 2025, month: 1 });
        assert_eq!(view.prev, MonthRef { year: 2024, month: 11 });
        assert_eq!(view.weeks[0][0].map(|d| d.booking_count), Some(2));
    }
}
