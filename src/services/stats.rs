//! Dashboard statistics service

use rust_decimal::Decimal;

use crate::{
    api::stats::{MonthRevenue, StatEntry, StatsResponse},
    error::AppResult,
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

fn entries<L: AsRef<str>>(rows: Vec<(L, i64)>) -> Vec<StatEntry> {
    rows.into_iter()
        .map(|(label, value)| StatEntry {
            label: label.as_ref().to_string(),
            value,
        })
        .collect()
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Bookings, rooms and service requests per status, and revenue per month of `year`
    pub async fn get_stats(&self, year: i32) -> AppResult<StatsResponse> {
        let bookings = self.repository.bookings.count_by_status().await?;
        let rooms = self.repository.rooms.count_by_status().await?;
        let requests = self.repository.service_requests.count_by_status().await?;
        let revenue = self.repository.bookings.revenue_by_month(year).await?;

        let total_revenue: Decimal = revenue.iter().map(|(_, amount)| *amount).sum();

        Ok(StatsResponse {
            year,
            total_bookings: bookings.iter().map(|(_, n)| n).sum(),
            bookings_by_status: entries(
                bookings.into_iter().map(|(s, n)| (s.as_str(), n)).collect(),
            ),
            rooms_by_status: entries(rooms.into_iter().map(|(s, n)| (s.as_str(), n)).collect()),
            service_requests_by_status: entries(
                requests.into_iter().map(|(s, n)| (s.as_str(), n)).collect(),
            ),
            revenue_by_month: revenue
                .into_iter()
                .map(|(month, revenue)| MonthRevenue { month, revenue })
                .collect(),
            total_revenue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_order() {
        let rows = vec![("approved", 3), ("pending", 1)];
        let out = entries(rows);
        assert_eq!(out[0].label, "approved");
        assert_eq!(out[1].value, 1);
    }
}
