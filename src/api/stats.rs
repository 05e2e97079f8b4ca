//! Dashboard statistics endpoints

use axum::{extract::Query, extract::State, Json};
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::AppResult, models::access::Capability};

use super::Session;

/// Statistics response
#[derive(Serialize, ToSchema)]
pub struct StatsResponse {
    pub year: i32,
    pub total_bookings: i64,
    /// Bookings by status
    pub bookings_by_status: Vec<StatEntry>,
    /// Rooms by status
    pub rooms_by_status: Vec<StatEntry>,
    /// Service requests by status
    pub service_requests_by_status: Vec<StatEntry>,
    /// Revenue of non-cancelled bookings by check-in month
    pub revenue_by_month: Vec<MonthRevenue>,
    pub total_revenue: Decimal,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

#[derive(Serialize, ToSchema)]
pub struct MonthRevenue {
    /// 1-based month
    pub month: i32,
    pub revenue: Decimal,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct StatsQuery {
    /// Revenue year, defaults to the current year
    pub year: Option<i32>,
}

/// Dashboard statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    params(StatsQuery),
    responses(
        (status = 200, description = "Statistics", body = StatsResponse),
        (status = 403, description = "Not allowed")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<StatsQuery>,
) -> AppResult<Json<StatsResponse>> {
    claims.require(Capability::ViewDashboard)?;

    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let stats = state.services.stats.get_stats(year).await?;
    Ok(Json(stats))
}
