//! Booking endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        access::Capability,
        booking::{Booking, BookingQuery, BookingQuote, CreateBooking, RoomRangeQuery, UpdateBooking},
    },
};

use super::Session;

/// List bookings with optional filters
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(BookingQuery),
    responses(
        (status = 200, description = "Bookings", body = Vec<Booking>),
        (status = 403, description = "Not allowed")
    )
)]
pub async fn list_bookings(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<BookingQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    claims.require(Capability::ViewBookings)?;

    let bookings = state.services.bookings.list(&query).await?;
    Ok(Json(bookings))
}

/// Bookings checking in on a given day
#[utoipa::path(
    get,
    path = "/bookings/date/{date}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("date" = NaiveDate, Path, description = "Day, YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Bookings of the day", body = Vec<Booking>),
        (status = 400, description = "Malformed date")
    )
)]
pub async fn bookings_for_date(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(date): Path<NaiveDate>,
) -> AppResult<Json<Vec<Booking>>> {
    claims.require(Capability::ViewBookings)?;

    let bookings = state.services.bookings.by_date(date).await?;
    Ok(Json(bookings))
}

/// Live bookings of a room overlapping `[check_in, check_out)`
#[utoipa::path(
    get,
    path = "/bookings/room-range",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(RoomRangeQuery),
    responses(
        (status = 200, description = "Overlapping bookings", body = Vec<Booking>),
        (status = 400, description = "Check-out not after check-in", body = crate::error::ErrorResponse)
    )
)]
pub async fn bookings_for_room_range(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<RoomRangeQuery>,
) -> AppResult<Json<Vec<Booking>>> {
    claims.require(Capability::ViewBookings)?;

    let bookings = state.services.bookings.room_range(&query).await?;
    Ok(Json(bookings))
}

/// Price and availability preview for a stay
#[utoipa::path(
    get,
    path = "/bookings/quote",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(RoomRangeQuery),
    responses(
        (status = 200, description = "Quote", body = BookingQuote),
        (status = 400, description = "Check-out not after check-in", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found")
    )
)]
pub async fn quote_booking(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<RoomRangeQuery>,
) -> AppResult<Json<BookingQuote>> {
    claims.require_any(&[Capability::ManageBookings, Capability::CreateOwnBooking])?;

    let quote = state
        .services
        .bookings
        .quote(query.room_id, query.check_in, query.check_out)
        .await?;
    Ok(Json(quote))
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    security(("bearer_auth" = [])),
    request_body = CreateBooking,
    responses(
        (status = 201, description = "Booking created", body = Booking),
        (status = 400, description = "Invalid stay", body = crate::error::ErrorResponse),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Selected room is already booked for the given dates", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_booking(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Json(booking): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    claims.require_any(&[Capability::ManageBookings, Capability::CreateOwnBooking])?;
    booking.validate()?;

    let created = state.services.bookings.create(&claims, booking).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Bookings of the current session's guest
#[utoipa::path(
    get,
    path = "/bookings/mine",
    tag = "bookings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Own bookings", body = Vec<Booking>)
    )
)]
pub async fn my_bookings(
    State(state): State<crate::AppState>,
    Session(claims): Session,
) -> AppResult<Json<Vec<Booking>>> {
    claims.require(Capability::ViewOwnBookings)?;

    let bookings = state.services.bookings.my_bookings(&claims).await?;
    Ok(Json(bookings))
}

/// Get a booking
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking", body = Booking),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Booking>> {
    claims.require_any(&[Capability::ViewBookings, Capability::ViewOwnBookings])?;

    let booking = state.services.bookings.get(id).await?;
    if !claims.can(Capability::ViewBookings) && !booking.guest_email.eq_ignore_ascii_case(&claims.sub) {
        return Err(AppError::NotFound(format!(
            "Booking with id {} not found",
            id
        )));
    }
    Ok(Json(booking))
}

/// Update dates, status or guest name of a booking
#[utoipa::path(
    put,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBooking,
    responses(
        (status = 200, description = "Booking updated", body = Booking),
        (status = 400, description = "Invalid stay", body = crate::error::ErrorResponse),
        (status = 404, description = "Booking not found"),
        (status = 409, description = "Selected room is already booked for the given dates", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_booking(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
    Json(update): Json<UpdateBooking>,
) -> AppResult<Json<Booking>> {
    claims.require_any(&[Capability::ManageBookings, Capability::ViewOwnBookings])?;

    let updated = state.services.bookings.update(&claims, id, update).await?;
    Ok(Json(updated))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/bookings/{id}",
    tag = "bookings",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 204, description = "Booking deleted"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn delete_booking(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Capability::ManageBookings)?;

    state.services.bookings.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
