//! Booking calendar endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{access::Capability, calendar::MonthView},
};

use super::Session;

/// Month grid with booking counts per day
#[utoipa::path(
    get,
    path = "/calendar/{year}/{month}",
    tag = "calendar",
    security(("bearer_auth" = [])),
    params(
        ("year" = i32, Path, description = "Year"),
        ("month" = i32, Path, description = "Month, 1 = January; out-of-range values roll over into adjacent years")
    ),
    responses(
        (status = 200, description = "Month view", body = MonthView),
        (status = 403, description = "Not allowed")
    )
)]
pub async fn month_view(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path((year, month)): Path<(i32, i32)>,
) -> AppResult<Json<MonthView>> {
    claims.require(Capability::ViewBookings)?;

    let view = state.services.calendar.month_view(year, month).await?;
    Ok(Json(view))
}
