//! API handlers for Hotel Sync REST endpoints

pub mod auth;
pub mod bookings;
pub mod calendar;
pub mod health;
pub mod openapi;
pub mod rooms;
pub mod service_requests;
pub mod stats;
pub mod users;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{error::AppError, models::user::SessionClaims, AppState};

/// The caller's session, decoded once per request from the bearer token
/// and passed explicitly to handlers. Revoked sessions are rejected.
pub struct Session(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AppError::Authentication("Missing or invalid authorization header".to_string())
                })?;

        let claims = state.services.auth.authenticate(bearer.token()).await?;
        Ok(Session(claims))
    }
}
