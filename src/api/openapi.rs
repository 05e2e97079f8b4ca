//! OpenAPI documentation

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, calendar, health, rooms, service_requests, stats, users};

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hotel Sync API",
        version = "1.0.0",
        description = "Hotel management REST API: rooms, bookings, booking calendar and service requests",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        auth::logout,
        // Users
        users::list_users,
        users::list_staff,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user,
        // Rooms
        rooms::list_rooms,
        rooms::get_room,
        rooms::create_room,
        rooms::update_room,
        rooms::delete_room,
        // Bookings
        bookings::list_bookings,
        bookings::bookings_for_date,
        bookings::bookings_for_room_range,
        bookings::quote_booking,
        bookings::create_booking,
        bookings::my_bookings,
        bookings::get_booking,
        bookings::update_booking,
        bookings::delete_booking,
        // Calendar
        calendar::month_view,
        // Service requests
        service_requests::list_service_requests,
        service_requests::get_service_request,
        service_requests::create_service_request,
        service_requests::update_service_request,
        service_requests::delete_service_request,
        // Stats
        stats::get_stats,
    ),
    components(
        schemas(
            // Auth
            crate::models::user::LoginRequest,
            crate::models::user::LoginResponse,
            crate::models::user::SessionInfo,
            crate::models::access::Capability,
            crate::models::access::View,
            // Users
            crate::models::user::Role,
            crate::models::user::User,
            crate::models::user::StaffMember,
            crate::models::user::CreateUser,
            crate::models::user::UpdateUser,
            // Rooms
            crate::models::room::RoomStatus,
            crate::models::room::Room,
            crate::models::room::CreateRoom,
            crate::models::room::UpdateRoom,
            // Bookings
            crate::models::booking::BookingStatus,
            crate::models::booking::Booking,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBooking,
            crate::models::booking::BookingQuote,
            // Calendar
            crate::calendar::CalendarDay,
            crate::models::calendar::MonthRef,
            crate::models::calendar::MonthView,
            // Service requests
            crate::models::service_request::ServiceRequestStatus,
            crate::models::service_request::ServiceRequest,
            crate::models::service_request::CreateServiceRequest,
            crate::models::service_request::UpdateServiceRequest,
            // Stats
            stats::StatsResponse,
            stats::StatEntry,
            stats::MonthRevenue,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Sessions"),
        (name = "users", description = "User management"),
        (name = "rooms", description = "Room inventory"),
        (name = "bookings", description = "Bookings, availability and pricing"),
        (name = "calendar", description = "Booking calendar"),
        (name = "service_requests", description = "Guest service requests"),
        (name = "stats", description = "Dashboard statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
