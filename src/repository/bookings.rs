//! Bookings repository for database operations
//!
//! Writes are the authoritative overlap check: each one locks the room row,
//! re-runs the overlap query and writes inside a single transaction. The
//! `bookings_no_overlap` exclusion constraint backs this up at the storage
//! level.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, Pool, Postgres, QueryBuilder};

use super::map_write_error;
use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{Booking, BookingChanges, BookingQuery, BookingStatus, NewBooking},
        room::Room,
    },
};

const BOOKING_SELECT: &str = r#"
    SELECT b.id, b.room_id, r.room_number, r.category AS room_category,
           b.guest_email, b.guest_name, b.check_in, b.check_out,
           b.total_price, b.status, b.crea_date, b.modif_date
    FROM bookings b
    JOIN rooms r ON r.id = b.room_id
"#;

/// Storage operations the booking service relies on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Room with its nightly rate
    async fn get_room(&self, room_id: i32) -> AppResult<Room>;

    async fn get(&self, id: i32) -> AppResult<Booking>;

    async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>>;

    /// Live bookings of a room overlapping `[check_in, check_out)`
    async fn for_room_in_range(
        &self,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<Vec<Booking>>;

    /// Check-in dates of live bookings in `[start, end)`
    async fn check_in_dates(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>>;

    async fn for_guest(&self, email: &str) -> AppResult<Vec<Booking>>;

    /// Insert, failing with `OverlapConflict` if the room is taken
    async fn create(&self, booking: &NewBooking) -> AppResult<Booking>;

    /// Replace dates, price, status and guest name, failing with `OverlapConflict`
    /// if the new stay hits another booking
    async fn update(&self, id: i32, changes: &BookingChanges) -> AppResult<Booking>;

    async fn delete(&self, id: i32) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Number of bookings per status
    pub async fn count_by_status(&self) -> AppResult<Vec<(BookingStatus, i64)>> {
        let rows = sqlx::query_as::<_, (BookingStatus, i64)>(
            "SELECT status, COUNT(*) FROM bookings GROUP BY status ORDER BY status",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Revenue of live bookings per check-in month of a year
    pub async fn revenue_by_month(&self, year: i32) -> AppResult<Vec<(i32, Decimal)>> {
        let rows = sqlx::query_as::<_, (i32, Decimal)>(
            r#"
            SELECT EXTRACT(MONTH FROM check_in)::int AS month,
                   COALESCE(SUM(total_price), 0) AS revenue
            FROM bookings
            WHERE status <> 'canceled' AND EXTRACT(YEAR FROM check_in)::int = $1
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

async fn fetch_by_id(conn: &mut PgConnection, id: i32) -> AppResult<Booking> {
    sqlx::query_as::<_, Booking>(&format!("{} WHERE b.id = $1", BOOKING_SELECT))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
}

/// Serialise writers on one room for the rest of the transaction
async fn lock_room(conn: &mut PgConnection, room_id: i32) -> AppResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM rooms WHERE id = $1 FOR UPDATE")
        .bind(room_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", room_id)))?;
    Ok(())
}

async fn overlap_exists(
    conn: &mut PgConnection,
    room_id: i32,
    check_in: NaiveDate,
    check_out: NaiveDate,
    excluding: Option<i32>,
) -> AppResult<bool> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM bookings
            WHERE room_id = $1
              AND status <> 'canceled'
              AND check_in < $3
              AND $2 < check_out
              AND ($4::int IS NULL OR id <> $4)
        )
        "#,
    )
    .bind(room_id)
    .bind(check_in)
    .bind(check_out)
    .bind(excluding)
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

#[async_trait]
impl BookingStore for BookingsRepository {
    async fn get_room(&self, room_id: i32) -> AppResult<Room> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(room_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room with id {} not found", room_id)))
    }

    async fn get(&self, id: i32) -> AppResult<Booking> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut conn, id).await
    }

    async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(BOOKING_SELECT);
        builder.push(" WHERE TRUE");

        if let Some(date) = query.date {
            builder.push(" AND b.check_in = ").push_bind(date);
        }
        if let Some(room_id) = query.room_id {
            builder.push(" AND b.room_id = ").push_bind(room_id);
        }
        if let Some(status) = query.status {
            builder.push(" AND b.status = ").push_bind(status);
        }
        if let Some(ref search) = query.search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (b.guest_email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR b.guest_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.room_number ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.category ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        builder.push(" ORDER BY b.check_in, b.id");

        let bookings = builder
            .build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await?;
        Ok(bookings)
    }

    async fn for_room_in_range(
        &self,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            r#"{}
            WHERE b.room_id = $1
              AND b.status <> 'canceled'
              AND b.check_in < $3
              AND $2 < b.check_out
            ORDER BY b.check_in"#,
            BOOKING_SELECT
        ))
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn check_in_dates(&self, start: NaiveDate, end: NaiveDate) -> AppResult<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT check_in FROM bookings
            WHERE status <> 'canceled' AND check_in >= $1 AND check_in < $2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(dates)
    }

    async fn for_guest(&self, email: &str) -> AppResult<Vec<Booking>> {
        let bookings = sqlx::query_as::<_, Booking>(&format!(
            "{} WHERE LOWER(b.guest_email) = LOWER($1) ORDER BY b.check_in DESC",
            BOOKING_SELECT
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await?;
        Ok(bookings)
    }

    async fn create(&self, booking: &NewBooking) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        lock_room(&mut tx, booking.room_id).await?;

        if booking.status != BookingStatus::Canceled
            && overlap_exists(
                &mut tx,
                booking.room_id,
                booking.stay.check_in(),
                booking.stay.check_out(),
                None,
            )
            .await?
        {
            return Err(AppError::OverlapConflict);
        }

        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings (room_id, guest_email, guest_name, check_in, check_out, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(booking.room_id)
        .bind(&booking.guest_email)
        .bind(&booking.guest_name)
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.total_price)
        .bind(booking.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Booking"))?;

        let created = fetch_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(|e| map_write_error(e, "Booking"))?;

        Ok(created)
    }

    async fn update(&self, id: i32, changes: &BookingChanges) -> AppResult<Booking> {
        let mut tx = self.pool.begin().await?;

        let room_id = sqlx::query_scalar::<_, i32>("SELECT room_id FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))?;

        lock_room(&mut tx, room_id).await?;

        if changes.status != BookingStatus::Canceled
            && overlap_exists(
                &mut tx,
                room_id,
                changes.stay.check_in(),
                changes.stay.check_out(),
                Some(id),
            )
            .await?
        {
            return Err(AppError::OverlapConflict);
        }

        sqlx::query(
            r#"
            UPDATE bookings
            SET check_in = $1, check_out = $2, total_price = $3, status = $4,
                guest_name = $5, modif_date = $6
            WHERE id = $7
            "#,
        )
        .bind(changes.stay.check_in())
        .bind(changes.stay.check_out())
        .bind(changes.total_price)
        .bind(changes.status)
        .bind(&changes.guest_name)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, "Booking"))?;

        let updated = fetch_by_id(&mut tx, id).await?;
        tx.commit().await.map_err(|e| map_write_error(e, "Booking"))?;

        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Booking with id {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        calendar::StayInterval,
        models::room::CreateRoom,
        repository::rooms::RoomsRepository,
    };
    use sqlx::postgres::PgPoolOptions;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Migrated pool when DATABASE_URL points at a Postgres server
    async fn test_pool() -> Option<Pool<Postgres>> {
        let url = match std::env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("DATABASE_URL not set, skipping database test");
                return None;
            }
        };
        let pool = PgPoolOptions::new()
            .max_connections(8)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        Some(pool)
    }

    async fn new_room(pool: &Pool<Postgres>) -> Room {
        let room_number = format!("T{}", Utc::now().timestamp_nanos_opt().unwrap_or_default());
        RoomsRepository::new(pool.clone())
            .create(&CreateRoom {
                room_number,
                category: "Double".to_string(),
                status: None,
                price: Decimal::new(10000, 2),
                description: None,
            })
            .await
            .unwrap()
    }

    fn stay(room_id: i32, check_in: NaiveDate, check_out: NaiveDate) -> NewBooking {
        let stay = StayInterval::new(check_in, check_out).unwrap();
        NewBooking {
            room_id,
            guest_email: "guest@example.com".to_string(),
            guest_name: None,
            total_price: Decimal::from(stay.nights()) * Decimal::new(10000, 2),
            stay,
            status: BookingStatus::Approved,
        }
    }

    #[tokio::test]
    async fn test_write_rejects_overlap_and_accepts_back_to_back() {
        let Some(pool) = test_pool().await else { return };
        let repo = BookingsRepository::new(pool.clone());
        let room = new_room(&pool).await;

        let first = repo
            .create(&stay(room.id, date(2031, 12, 1), date(2031, 12, 4)))
            .await
            .unwrap();
        let next = repo
            .create(&stay(room.id, date(2031, 12, 4), date(2031, 12, 5)))
            .await
            .unwrap();

        let clash = repo
            .create(&stay(room.id, date(2031, 12, 2), date(2031, 12, 6)))
            .await;
        assert!(matches!(clash, Err(AppError::OverlapConflict)));

        // Moving the second stay onto the first is refused too
        let moved = repo
            .update(
                next.id,
                &BookingChanges {
                    stay: StayInterval::new(date(2031, 12, 3), date(2031, 12, 5)).unwrap(),
                    total_price: Decimal::new(20000, 2),
                    status: BookingStatus::Approved,
                    guest_name: None,
                },
            )
            .await;
        assert!(matches!(moved, Err(AppError::OverlapConflict)));

        // Amounts too large for the column are a validation error
        let mut huge = stay(room.id, date(2032, 1, 1), date(2032, 1, 2));
        huge.total_price = Decimal::new(1_000_000_000, 0);
        assert!(matches!(repo.create(&huge).await, Err(AppError::Validation(_))));

        repo.delete(next.id).await.unwrap();
        repo.delete(first.id).await.unwrap();
        RoomsRepository::new(pool).delete(room.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_concurrent_writers_only_one_wins() {
        let Some(pool) = test_pool().await else { return };
        let repo = BookingsRepository::new(pool.clone());
        let room = new_room(&pool).await;

        let mut handles = Vec::new();
        for _ in 0..5 {
            let repo = repo.clone();
            let booking = stay(room.id, date(2032, 1, 10), date(2032, 1, 12));
            handles.push(tokio::spawn(async move { repo.create(&booking).await }));
        }

        let mut created = Vec::new();
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(booking) => created.push(booking),
                Err(AppError::OverlapConflict) => conflicts += 1,
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(created.len(), 1);
        assert_eq!(conflicts, 4);

        for booking in created {
            repo.delete(booking.id).await.unwrap();
        }
        RoomsRepository::new(pool).delete(room.id).await.unwrap();
    }
}
