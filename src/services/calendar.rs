//! Booking calendar month views

use std::sync::Arc;

use crate::{
    calendar::{density_map, BookingDensity, CalendarMonth},
    error::AppResult,
    models::calendar::MonthView,
    repository::BookingStore,
};

#[derive(Clone)]
pub struct CalendarService {
    store: Arc<dyn BookingStore>,
}

impl CalendarService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    /// Check-in counts per day of a month
    pub async fn density(&self, month: CalendarMonth) -> AppResult<BookingDensity> {
        // Years chrono cannot represent have no bookings
        let Some((start, end)) = month.bounds() else {
            return Ok(BookingDensity::new());
        };
        let dates = self.store.check_in_dates(start, end).await?;
        Ok(density_map(dates))
    }

    /// Month grid annotated with booking counts. `month` is 1-based and
    /// normalised with year carry, so 0 and 13 are valid.
    pub async fn month_view(&self, year: i32, month: i32) -> AppResult<MonthView> {
        let month = CalendarMonth::new(year, month.saturating_sub(1));
        let density = self.density(month).await?;
        Ok(MonthView::build(month, &density))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::bookings::MockBookingStore;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_month_view_counts_check_ins() {
        let mut store = MockBookingStore::new();
        store
            .expect_check_in_dates()
            .withf(|start, end| *start == date(2024, 2, 1) && *end == date(2024, 3, 1))
            .times(1)
            .returning(|_, _| Ok(vec![date(2024, 2, 29), date(2024, 2, 29), date(2024, 2, 1)]));

        let service = CalendarService::new(Arc::new(store));
        let view = service.month_view(2024, 2).await.unwrap();

        assert_eq!(view.month_name, "February");
        assert_eq!(view.total_bookings, 3);
        let leap_day = view
            .weeks
            .iter()
            .flatten()
            .flatten()
            .find(|d| d.day_of_month == 29)
            .unwrap();
        assert_eq!(leap_day.booking_count, 2);
    }

    #[tokio::test]
    async fn test_month_thirteen_rolls_over() {
        let mut store = MockBookingStore::new();
        store
            .expect_check_in_dates()
            .withf(|start, _| *start == date(2025, 1, 1))
            .returning(|_, _| Ok(Vec::new()));

        let service = CalendarService::new(Arc::new(store));
        let view = service.month_view(2024, 13).await.unwrap();
        assert_eq!((view.year, view.month), (2025, 1));
        assert_eq!(view.total_bookings, 0);
    }
}
