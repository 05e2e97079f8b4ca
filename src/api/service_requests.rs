//! Service request endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        access::Capability,
        service_request::{
            CreateServiceRequest, ServiceRequest, ServiceRequestQuery, UpdateServiceRequest,
        },
    },
};

use super::Session;

#[utoipa::path(
    get,
    path = "/service-requests",
    tag = "service_requests",
    security(("bearer_auth" = [])),
    params(ServiceRequestQuery),
    responses(
        (status = 200, description = "Service requests", body = Vec<ServiceRequest>)
    )
)]
pub async fn list_service_requests(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<ServiceRequestQuery>,
) -> AppResult<Json<Vec<ServiceRequest>>> {
    claims.require(Capability::ViewServiceRequests)?;

    let requests = state.services.service_requests.list(&query).await?;
    Ok(Json(requests))
}

#[utoipa::path(
    get,
    path = "/service-requests/{id}",
    tag = "service_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Service request ID")
    ),
    responses(
        (status = 200, description = "Service request", body = ServiceRequest),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn get_service_request(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<Json<ServiceRequest>> {
    claims.require(Capability::ViewServiceRequests)?;

    let request = state.services.service_requests.get(id).await?;
    Ok(Json(request))
}

/// Create a service request; the assignee gets an email
#[utoipa::path(
    post,
    path = "/service-requests",
    tag = "service_requests",
    security(("bearer_auth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service request created", body = ServiceRequest),
        (status = 409, description = "Unknown assignee")
    )
)]
pub async fn create_service_request(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Json(request): Json<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceRequest>)> {
    claims.require(Capability::ManageServiceRequests)?;
    request.validate()?;

    let created = state.services.service_requests.create(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/service-requests/{id}",
    tag = "service_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Service request ID")
    ),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Service request updated", body = ServiceRequest),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn update_service_request(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
    Json(request): Json<UpdateServiceRequest>,
) -> AppResult<Json<ServiceRequest>> {
    claims.require(Capability::ManageServiceRequests)?;
    request.validate()?;

    let updated = state.services.service_requests.update(id, request).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/service-requests/{id}",
    tag = "service_requests",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Service request ID")
    ),
    responses(
        (status = 204, description = "Service request deleted"),
        (status = 404, description = "Service request not found")
    )
)]
pub async fn delete_service_request(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Capability::ManageServiceRequests)?;

    state.services.service_requests.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
