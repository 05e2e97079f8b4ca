//! Guest service requests and staff assignment

use tokio::task::JoinHandle;

use crate::{
    error::AppResult,
    models::service_request::{
        CreateServiceRequest, ServiceRequest, ServiceRequestQuery, UpdateServiceRequest,
    },
    repository::Repository,
    services::email::EmailService,
};

#[derive(Clone)]
pub struct ServiceRequestsService {
    repository: Repository,
    email: EmailService,
}

impl ServiceRequestsService {
    pub fn new(repository: Repository, email: EmailService) -> Self {
        Self { repository, email }
    }

    pub async fn list(&self, query: &ServiceRequestQuery) -> AppResult<Vec<ServiceRequest>> {
        self.repository.service_requests.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<ServiceRequest> {
        self.repository.service_requests.get_by_id(id).await
    }

    pub async fn create(&self, request: CreateServiceRequest) -> AppResult<ServiceRequest> {
        let created = self.repository.service_requests.create(&request).await?;
        tracing::info!(request_id = created.id, "Service request created");

        if let Some(staff_id) = created.assigned_to_staff {
            self.notify_in_background(staff_id, created.clone());
        }
        Ok(created)
    }

    pub async fn update(&self, id: i32, request: UpdateServiceRequest) -> AppResult<ServiceRequest> {
        let previous = self.repository.service_requests.get_by_id(id).await?;
        let updated = self.repository.service_requests.update(id, &request).await?;

        if let Some(staff_id) = updated.assigned_to_staff {
            if previous.assigned_to_staff != Some(staff_id) {
                self.notify_in_background(staff_id, updated.clone());
            }
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.service_requests.delete(id).await
    }

    /// Send the assignment email off the request path
    fn notify_in_background(&self, staff_id: i32, request: ServiceRequest) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move { service.notify_assignee(staff_id, &request).await })
    }

    /// Email the assignee; failures are logged, never returned
    async fn notify_assignee(&self, staff_id: i32, request: &ServiceRequest) {
        let staff = match self.repository.users.get_by_id(staff_id).await {
            Ok(staff) => staff,
            Err(e) => {
                tracing::warn!(staff_id, error = %e, "Assignee lookup failed");
                return;
            }
        };

        if let Err(e) = self
            .email
            .send_service_request_assigned(&staff.email, &staff.name, &request.description)
            .await
        {
            tracing::warn!(
                request_id = request.id,
                staff_id,
                error = %e,
                "Failed to send service request notification"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, models::service_request::ServiceRequestStatus};
    use sqlx::postgres::PgPoolOptions;
    use std::time::Duration;

    #[tokio::test]
    async fn test_notification_failure_stays_in_background() {
        let config = AppConfig::default();
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(200))
            .connect_lazy(&config.database.url)
            .unwrap();
        let service =
            ServiceRequestsService::new(Repository::new(pool), EmailService::new(config.email));

        let request = ServiceRequest {
            id: 1,
            description: "Extra towels".to_string(),
            status: ServiceRequestStatus::Pending,
            assigned_to_staff: Some(i32::MAX),
            assigned_staff_name: None,
            crea_date: chrono::Utc::now(),
            modif_date: None,
        };

        // Unknown assignee: the lookup fails and is only logged
        let handle = service.notify_in_background(i32::MAX, request);
        assert!(handle.await.is_ok());
    }
}
