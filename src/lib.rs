//! Hotel Sync
//!
//! REST server for a hotel dashboard: rooms, bookings with race-free
//! availability checks, the booking calendar and guest service requests.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod api;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Sessions
        .route("/auth/login", post(api::auth::login))
        .route("/auth/logout", post(api::auth::logout))
        .route("/auth/me", get(api::auth::me))
        // Users
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route("/users/staff", get(api::users::list_staff))
        .route(
            "/users/:id",
            get(api::users::get_user)
                .put(api::users::update_user)
                .delete(api::users::delete_user),
        )
        // Rooms
        .route("/rooms", get(api::rooms::list_rooms).post(api::rooms::create_room))
        .route(
            "/rooms/:id",
            get(api::rooms::get_room)
                .put(api::rooms::update_room)
                .delete(api::rooms::delete_room),
        )
        // Bookings
        .route(
            "/bookings",
            get(api::bookings::list_bookings).post(api::bookings::create_booking),
        )
        .route("/bookings/mine", get(api::bookings::my_bookings))
        .route("/bookings/quote", get(api::bookings::quote_booking))
        .route("/bookings/room-range", get(api::bookings::bookings_for_room_range))
        .route("/bookings/date/:date", get(api::bookings::bookings_for_date))
        .route(
            "/bookings/:id",
            get(api::bookings::get_booking)
                .put(api::bookings::update_booking)
                .delete(api::bookings::delete_booking),
        )
        // Calendar
        .route("/calendar/:year/:month", get(api::calendar::month_view))
        // Service requests
        .route(
            "/service-requests",
            get(api::service_requests::list_service_requests)
                .post(api::service_requests::create_service_request),
        )
        .route(
            "/service-requests/:id",
            get(api::service_requests::get_service_request)
                .put(api::service_requests::update_service_request)
                .delete(api::service_requests::delete_service_request),
        )
        // Statistics
        .route("/stats", get(api::stats::get_stats))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::{
        models::user::{Role, SessionClaims, User},
        repository::Repository,
        services::{redis::RedisService, Services},
    };

    /// Router over a pool and Redis client that never connect unless a
    /// handler gets past authentication
    fn test_app() -> Router {
        let config = AppConfig::default();
        let pool = PgPoolOptions::new()
            .connect_lazy(&config.database.url)
            .unwrap();
        let redis = RedisService::new(&config.redis.url).unwrap();
        let services = Services::new(
            Repository::new(pool),
            config.auth.clone(),
            config.email.clone(),
            redis,
        );
        create_router(AppState {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "healthy");
    }

    #[tokio::test]
    async fn test_missing_token_is_401() {
        let response = test_app()
            .oneshot(Request::get("/api/v1/calendar/2024/12").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["error"], "NotAuthorized");
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_401() {
        let user = User {
            id: 1,
            nic: None,
            name: "Mallory".to_string(),
            email: "mallory@example.com".to_string(),
            phone: None,
            address: None,
            role: Role::Admin,
            password: String::new(),
            crea_date: chrono::Utc::now(),
            modif_date: None,
        };
        let token = SessionClaims::for_user(&user, chrono::Utc::now().timestamp(), 3600)
            .create_token("not-the-server-secret")
            .unwrap();

        let response = test_app()
            .oneshot(
                Request::get("/api/v1/bookings")
                    .header(header::AUTHORIZATION, format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let response = test_app()
            .oneshot(Request::get("/api-docs/openapi.json").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let doc = json_body(response).await;
        assert!(doc["paths"]["/calendar/{year}/{month}"].is_object());
        assert!(doc["components"]["securitySchemes"]["bearer_auth"].is_object());

        let ready = &doc["paths"]["/ready"]["get"]["responses"];
        assert!(ready["503"].is_object());
        assert!(ready["500"].is_null());
    }
}
