//! Rooms repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres, QueryBuilder};

use super::map_write_error;
use crate::{
    error::{AppError, AppResult},
    models::room::{CreateRoom, Room, RoomQuery, RoomStatus, UpdateRoom},
};

#[derive(Clone)]
pub struct RoomsRepository {
    pool: Pool<Postgres>,
}

impl RoomsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get room by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// List rooms, optionally by category and status
    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<Room>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM rooms WHERE TRUE");

        if let Some(ref category) = query.category {
            builder.push(" AND LOWER(category) = LOWER(").push_bind(category.clone()).push(")");
        }
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status);
        }
        builder.push(" ORDER BY room_number");

        let rooms = builder.build_query_as::<Room>().fetch_all(&self.pool).await?;
        Ok(rooms)
    }

    /// Create a room
    pub async fn create(&self, room: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (room_number, category, status, price, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&room.room_number)
        .bind(&room.category)
        .bind(room.status.unwrap_or(RoomStatus::Available))
        .bind(room.price)
        .bind(&room.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Room"))
    }

    /// Update a room; absent fields are left unchanged
    pub async fn update(&self, id: i32, room: &UpdateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms SET
                room_number = COALESCE($1, room_number),
                category = COALESCE($2, category),
                status = COALESCE($3, status),
                price = COALESCE($4, price),
                description = COALESCE($5, description),
                modif_date = $6
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&room.room_number)
        .bind(&room.category)
        .bind(room.status)
        .bind(room.price)
        .bind(&room.description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "Room"))?
        .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", id)))
    }

    /// Delete a room; rooms with bookings cannot be deleted
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "Room"))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Room with id {} not found", id)));
        }
        Ok(())
    }

    /// Number of rooms per status
    pub async fn count_by_status(&self) -> AppResult<Vec<(RoomStatus, i64)>> {
        let rows = sqlx::query_as::<_, (RoomStatus, i64)>(
            "SELECT status, COUNT(*) FROM rooms GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
