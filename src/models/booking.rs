//! Booking model and related types

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::calendar::{Occupancy, StayInterval};

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Canceled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Canceled => "canceled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "canceled" | "cancelled" => Ok(BookingStatus::Canceled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

super::text_column!(BookingStatus);

/// Booking with its room reference
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Booking {
    pub id: i32,
    pub room_id: i32,
    pub room_number: String,
    pub room_category: String,
    pub guest_email: String,
    pub guest_name: Option<String>,
    /// First night
    pub check_in: NaiveDate,
    /// Departure day, not occupied
    pub check_out: NaiveDate,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

impl Occupancy for Booking {
    fn room_id(&self) -> i32 {
        self.room_id
    }

    fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    fn holds_room(&self) -> bool {
        self.status != BookingStatus::Canceled
    }
}

/// Create booking request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBooking {
    pub room_id: i32,
    /// Guest email; defaults to the caller's own email
    #[validate(email(message = "Invalid email format"))]
    pub guest_email: Option<String>,
    pub guest_name: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: Option<BookingStatus>,
}

/// A booking ready to be written: validated stay and computed price
#[derive(Debug, Clone, PartialEq)]
pub struct NewBooking {
    pub room_id: i32,
    pub guest_email: String,
    pub guest_name: Option<String>,
    pub stay: StayInterval,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

/// Update booking request
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBooking {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub status: Option<BookingStatus>,
    pub guest_name: Option<String>,
}

/// Full replacement values for a stored booking
#[derive(Debug, Clone, PartialEq)]
pub struct BookingChanges {
    pub stay: StayInterval,
    pub total_price: Decimal,
    pub status: BookingStatus,
    pub guest_name: Option<String>,
}

/// Booking list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct BookingQuery {
    /// Bookings checking in on this date (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    pub room_id: Option<i32>,
    pub status: Option<BookingStatus>,
    /// Free-text search in guest, room number and category
    pub search: Option<String>,
}

/// Availability query for one room
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct RoomRangeQuery {
    pub room_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Price preview for a stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookingQuote {
    pub room_id: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_rate: Decimal,
    pub total_price: Decimal,
    /// Advisory only; the write re-checks
    pub available: bool,
}
