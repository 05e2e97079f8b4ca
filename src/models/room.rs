//! Room model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Room status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    Available,
    Booked,
    Maintenance,
}

impl RoomStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "available",
            RoomStatus::Booked => "booked",
            RoomStatus::Maintenance => "maintenance",
        }
    }
}

impl std::str::FromStr for RoomStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(RoomStatus::Available),
            "booked" => Ok(RoomStatus::Booked),
            "maintenance" => Ok(RoomStatus::Maintenance),
            _ => Err(format!("Invalid room status: {}", s)),
        }
    }
}

super::text_column!(RoomStatus);

/// Room model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Room {
    pub id: i32,
    pub room_number: String,
    /// Room category (Single, Double, Suite, ...)
    pub category: String,
    pub status: RoomStatus,
    /// Nightly rate
    pub price: Decimal,
    pub description: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Largest amount a `NUMERIC(10, 2)` money column holds: 99,999,999.99
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

fn valid_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        let mut err = ValidationError::new("non_negative");
        err.message = Some("Price cannot be negative".into());
        return Err(err);
    }
    if *price > MAX_AMOUNT {
        let mut err = ValidationError::new("max_amount");
        err.message = Some(format!("Price cannot exceed {}", MAX_AMOUNT).into());
        return Err(err);
    }
    Ok(())
}

/// Room query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RoomQuery {
    /// Filter by category (case-insensitive)
    pub category: Option<String>,
    pub status: Option<RoomStatus>,
}

/// Create room request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoom {
    #[validate(length(min = 1, message = "Room number is required"))]
    pub room_number: String,
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
    pub status: Option<RoomStatus>,
    #[validate(custom(function = "valid_price"))]
    pub price: Decimal,
    pub description: Option<String>,
}

/// Update room request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRoom {
    #[validate(length(min = 1, message = "Room number cannot be empty"))]
    pub room_number: Option<String>,
    #[validate(length(min = 1, message = "Category cannot be empty"))]
    pub category: Option<String>,
    pub status: Option<RoomStatus>,
    #[validate(custom(function = "valid_price"))]
    pub price: Option<Decimal>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let room = CreateRoom {
            room_number: "101".to_string(),
            category: "Single".to_string(),
            status: None,
            price: Decimal::new(-100, 2),
            description: None,
        };
        assert!(room.validate().is_err());

        let room = CreateRoom { price: Decimal::ZERO, ..room };
        assert!(room.validate().is_ok());
    }

    #[test]
    fn test_price_capped_at_column_limit() {
        assert_eq!(MAX_AMOUNT.to_string(), "99999999.99");

        let room = CreateRoom {
            room_number: "PH".to_string(),
            category: "Suite".to_string(),
            status: None,
            price: MAX_AMOUNT,
            description: None,
        };
        assert!(room.validate().is_ok());

        let room = CreateRoom { price: Decimal::new(100_000_000, 0), ..room };
        assert!(room.validate().is_err());
    }

    #[test]
    fn test_update_price_optional() {
        assert!(UpdateRoom::default().validate().is_ok());
        let update = UpdateRoom {
            price: Some(Decimal::new(-1, 0)),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&RoomStatus::Maintenance).unwrap(), "\"maintenance\"");
        assert_eq!("Booked".parse::<RoomStatus>(), Ok(RoomStatus::Booked));
    }
}
