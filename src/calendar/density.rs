//! Booking density lookup
//!
//! Density maps are keyed by `YYYY-MM-DD` with zero-padded month and day.
//! Grid cells and stored bookings must go through [`date_key`] so that both
//! sides of the lookup agree on the format.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::grid::{CalendarCell, CalendarMonth};

/// Number of bookings per date key
pub type BookingDensity = HashMap<String, i64>;

/// Canonical `YYYY-MM-DD` key of a date
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Count dates into a density map
pub fn density_map<I>(dates: I) -> BookingDensity
where
    I: IntoIterator<Item = NaiveDate>,
{
    let mut density = BookingDensity::new();
    for date in dates {
        *density.entry(date_key(date)).or_insert(0) += 1;
    }
    density
}

/// Bookings recorded for a day; absent keys count as 0.
pub fn booking_count_for_day(day: NaiveDate, density: &BookingDensity) -> i64 {
    density.get(&date_key(day)).copied().unwrap_or(0)
}

/// Fill in `booking_count` on every day cell of a month grid.
pub fn annotate(month: &CalendarMonth, cells: &mut [CalendarCell], density: &BookingDensity) {
    for day in cells.iter_mut().flatten() {
        day.booking_count = month
            .date(day.day_of_month)
            .map(|date| booking_count_for_day(date, density))
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::grid::build_month_grid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_key_is_zero_padded() {
        assert_eq!(date_key(date(2024, 3, 5)), "2024-03-05");
        assert_eq!(date_key(date(2024, 12, 25)), "2024-12-25");
    }

    #[test]
    fn test_missing_day_counts_zero() {
        let density = density_map([date(2024, 12, 1)]);
        assert_eq!(booking_count_for_day(date(2024, 12, 2), &density), 0);
        assert_eq!(booking_count_for_day(date(2024, 12, 2), &BookingDensity::new()), 0);
    }

    #[test]
    fn test_density_counts_duplicates() {
        let density = density_map([
            date(2024, 12, 1),
            date(2024, 12, 1),
            date(2024, 12, 25),
            date(2024, 12, 10),
        ]);
        assert_eq!(booking_count_for_day(date(2024, 12, 1), &density), 2);
        assert_eq!(booking_count_for_day(date(2024, 12, 25), &density), 1);
    }

    #[test]
    fn test_annotate_month_grid() {
        let month = CalendarMonth::new(2024, 11);
        let mut cells = build_month_grid(2024, 11);
        let density = density_map([date(2024, 12, 1), date(2024, 12, 1), date(2024, 11, 30)]);

        annotate(&month, &mut cells, &density);

        let counts: Vec<(u32, i64)> = cells
            .iter()
            .flatten()
            .filter(|d| d.booking_count > 0)
            .map(|d| (d.day_of_month, d.booking_count))
            .collect();
        assert_eq!(counts, vec![(1, 2)]);
    }
}
