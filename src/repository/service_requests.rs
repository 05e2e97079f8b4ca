//! Service requests repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::map_write_error;
use crate::{
    error::{AppError, AppResult},
    models::service_request::{
        CreateServiceRequest, ServiceRequest, ServiceRequestQuery, ServiceRequestStatus,
        UpdateServiceRequest,
    },
};

const SERVICE_REQUEST_SELECT: &str = r#"
    SELECT s.id, s.description, s.status, s.assigned_to_staff,
           u.name AS assigned_staff_name, s.crea_date, s.modif_date
    FROM service_requests s
    LEFT JOIN users u ON u.id = s.assigned_to_staff
"#;

#[derive(Clone)]
pub struct ServiceRequestsRepository {
    pool: Pool<Postgres>,
}

impl ServiceRequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<ServiceRequest> {
        sqlx::query_as::<_, ServiceRequest>(&format!("{} WHERE s.id = $1", SERVICE_REQUEST_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Service request with id {} not found", id)))
    }

    pub async fn list(&self, query: &ServiceRequestQuery) -> AppResult<Vec<ServiceRequest>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(SERVICE_REQUEST_SELECT);
        builder.push(" WHERE TRUE");

        if let Some(status) = query.status {
            builder.push(" AND s.status = ").push_bind(status);
        }
        if let Some(staff_id) = query.assigned_to_staff {
            builder.push(" AND s.assigned_to_staff = ").push_bind(staff_id);
        }
        builder.push(" ORDER BY s.crea_date DESC, s.id DESC");

        let requests = builder
            .build_query_as::<ServiceRequest>()
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    pub async fn create(&self, request: &CreateServiceRequest) -> AppResult<ServiceRequest> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO service_requests (description, status, assigned_to_staff)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&request.description)
        .bind(request.status.unwrap_or(ServiceRequestStatus::Pending))
        .bind(request.assigned_to_staff)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Service request"))?;

        self.get_by_id(id).await
    }

    pub async fn update(&self, id: i32, request: &UpdateServiceRequest) -> AppResult<ServiceRequest> {
        let result = sqlx::query(
            r#"
            UPDATE service_requests SET
                description = COALESCE($1, description),
                status = COALESCE($2, status),
                assigned_to_staff = COALESCE($3, assigned_to_staff),
                modif_date = $4
            WHERE id = $5
            "#,
        )
        .bind(&request.description)
        .bind(request.status)
        .bind(request.assigned_to_staff)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Service request"))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service request with id {} not found", id)));
        }
        self.get_by_id(id).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM service_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Service request with id {} not found", id)));
        }
        Ok(())
    }

    /// Number of service requests per status
    pub async fn count_by_status(&self) -> AppResult<Vec<(ServiceRequestStatus, i64)>> {
        let rows = sqlx::query_as::<_, (ServiceRequestStatus, i64)>(
            "SELECT status, COUNT(*) FROM service_requests GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
