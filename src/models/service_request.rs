//! Service request model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Service request status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ServiceRequestStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl ServiceRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceRequestStatus::Pending => "Pending",
            ServiceRequestStatus::InProgress => "In Progress",
            ServiceRequestStatus::Completed => "Completed",
        }
    }
}

impl std::str::FromStr for ServiceRequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ServiceRequestStatus::Pending),
            "in progress" | "in_progress" => Ok(ServiceRequestStatus::InProgress),
            "completed" => Ok(ServiceRequestStatus::Completed),
            _ => Err(format!("Invalid service request status: {}", s)),
        }
    }
}

super::text_column!(ServiceRequestStatus);

/// Service request with its assignee
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ServiceRequest {
    pub id: i32,
    pub description: String,
    pub status: ServiceRequestStatus,
    pub assigned_to_staff: Option<i32>,
    pub assigned_staff_name: Option<String>,
    pub crea_date: DateTime<Utc>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Service request list filters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ServiceRequestQuery {
    pub status: Option<ServiceRequestStatus>,
    pub assigned_to_staff: Option<i32>,
}

/// Create service request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub status: Option<ServiceRequestStatus>,
    pub assigned_to_staff: Option<i32>,
}

/// Update service request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    pub status: Option<ServiceRequestStatus>,
    pub assigned_to_staff: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(
            serde_json::to_string(&ServiceRequestStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            "in progress".parse::<ServiceRequestStatus>(),
            Ok(ServiceRequestStatus::InProgress)
        );
    }
}
