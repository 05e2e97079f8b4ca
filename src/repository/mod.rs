//! Repository layer for database operations

pub mod bookings;
pub mod rooms;
pub mod service_requests;
pub mod users;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

pub use bookings::BookingStore;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub users: users::UsersRepository,
    pub rooms: rooms::RoomsRepository,
    pub bookings: bookings::BookingsRepository,
    pub service_requests: service_requests::ServiceRequestsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            users: users::UsersRepository::new(pool.clone()),
            rooms: rooms::RoomsRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            service_requests: service_requests::ServiceRequestsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Check database connectivity
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const EXCLUSION_VIOLATION: &str = "23P01";
const NUMERIC_OUT_OF_RANGE: &str = "22003";

/// Map constraint violations raised by a write to domain errors.
/// `what` names the entity in conflict messages.
pub(crate) fn map_write_error(e: sqlx::Error, what: &str) -> AppError {
    if let sqlx::Error::Database(ref db) = e {
        match db.code().as_deref() {
            Some(EXCLUSION_VIOLATION) => return AppError::OverlapConflict,
            Some(UNIQUE_VIOLATION) => {
                return AppError::Conflict(format!("{} already exists", what))
            }
            Some(FOREIGN_KEY_VIOLATION) => {
                return AppError::Conflict(format!("{} is referenced by other records", what))
            }
            Some(CHECK_VIOLATION) => {
                return AppError::Validation(format!("Invalid {} values", what.to_lowercase()))
            }
            Some(NUMERIC_OUT_OF_RANGE) => {
                return AppError::Validation(format!("{} amount out of range", what))
            }
            _ => {}
        }
    }
    AppError::Database(e)
}
