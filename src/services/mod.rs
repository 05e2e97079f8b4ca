//! Business logic services

pub mod auth;
pub mod bookings;
pub mod calendar;
pub mod email;
pub mod redis;
pub mod rooms;
pub mod service_requests;
pub mod stats;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, EmailConfig},
    repository::{BookingStore, Repository},
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub users: users::UsersService,
    pub rooms: rooms::RoomsService,
    pub bookings: bookings::BookingsService,
    pub calendar: calendar::CalendarService,
    pub service_requests: service_requests::ServiceRequestsService,
    pub stats: stats::StatsService,
    pub redis: redis::RedisService,
    pub repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        email_config: EmailConfig,
        redis_service: redis::RedisService,
    ) -> Self {
        let store: Arc<dyn BookingStore> = Arc::new(repository.bookings.clone());
        let email = email::EmailService::new(email_config);

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, redis_service.clone()),
            users: users::UsersService::new(repository.clone()),
            rooms: rooms::RoomsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(store.clone()),
            calendar: calendar::CalendarService::new(store),
            service_requests: service_requests::ServiceRequestsService::new(repository.clone(), email),
            stats: stats::StatsService::new(repository.clone()),
            redis: redis_service,
            repository,
        }
    }
}
