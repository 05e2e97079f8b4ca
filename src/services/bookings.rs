//! Booking service: stay validation, pricing and the booking lifecycle

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    calendar::{has_overlap, stay_price, StayInterval},
    error::{AppError, AppResult},
    models::{
        access::Capability,
        booking::{
            Booking, BookingChanges, BookingQuery, BookingQuote, BookingStatus, CreateBooking,
            NewBooking, RoomRangeQuery, UpdateBooking,
        },
        room::{RoomStatus, MAX_AMOUNT},
        user::SessionClaims,
    },
    repository::BookingStore,
};

#[derive(Clone)]
pub struct BookingsService {
    store: Arc<dyn BookingStore>,
}

fn same_guest(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Stay price, refused when it would not fit the stored amount
fn priced_stay(stay: &StayInterval, nightly_rate: Decimal) -> AppResult<Decimal> {
    let total = stay_price(stay, nightly_rate);
    if total > MAX_AMOUNT {
        return Err(AppError::Validation(format!(
            "Stay of {} nights costs {}, above the maximum of {}",
            stay.nights(),
            total,
            MAX_AMOUNT
        )));
    }
    Ok(total)
}

impl BookingsService {
    pub fn new(store: Arc<dyn BookingStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self, query: &BookingQuery) -> AppResult<Vec<Booking>> {
        self.store.list(query).await
    }

    /// Bookings checking in on a given day
    pub async fn by_date(&self, date: NaiveDate) -> AppResult<Vec<Booking>> {
        self.store
            .list(&BookingQuery {
                date: Some(date),
                ..Default::default()
            })
            .await
    }

    /// Live bookings of a room overlapping a stay
    pub async fn room_range(&self, query: &RoomRangeQuery) -> AppResult<Vec<Booking>> {
        let stay = StayInterval::new(query.check_in, query.check_out)?;
        self.store
            .for_room_in_range(query.room_id, stay.check_in(), stay.check_out())
            .await
    }

    pub async fn get(&self, id: i32) -> AppResult<Booking> {
        self.store.get(id).await
    }

    /// Bookings of the session's own guest email
    pub async fn my_bookings(&self, session: &SessionClaims) -> AppResult<Vec<Booking>> {
        self.store.for_guest(&session.sub).await
    }

    /// Price and availability preview; nothing is written
    pub async fn quote(
        &self,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<BookingQuote> {
        let stay = StayInterval::new(check_in, check_out)?;
        let room = self.store.get_room(room_id).await?;
        let total_price = priced_stay(&stay, room.price)?;
        let existing = self
            .store
            .for_room_in_range(room_id, stay.check_in(), stay.check_out())
            .await?;

        Ok(BookingQuote {
            room_id,
            check_in,
            check_out,
            nights: stay.nights(),
            nightly_rate: room.price,
            total_price,
            available: room.status != RoomStatus::Maintenance
                && !has_overlap(room_id, &stay, &existing),
        })
    }

    /// Create a booking. The stay is validated before the store is touched;
    /// the store re-checks overlap atomically with the insert.
    pub async fn create(&self, session: &SessionClaims, request: CreateBooking) -> AppResult<Booking> {
        let stay = StayInterval::new(request.check_in, request.check_out)?;

        let manages = session.can(Capability::ManageBookings);
        let guest_email = match request.guest_email {
            Some(email) if manages => email,
            Some(email) if same_guest(&email, &session.sub) => session.sub.clone(),
            Some(_) => {
                return Err(AppError::Authorization(
                    "Cannot book on behalf of another guest".to_string(),
                ))
            }
            None => session.sub.clone(),
        };
        let status = match request.status {
            Some(status) if manages => status,
            _ => BookingStatus::Pending,
        };

        let room = self.store.get_room(request.room_id).await?;
        if room.status == RoomStatus::Maintenance {
            return Err(AppError::BadRequest(format!(
                "Room {} is under maintenance",
                room.room_number
            )));
        }

        let booking = NewBooking {
            room_id: room.id,
            guest_email,
            guest_name: request.guest_name,
            total_price: priced_stay(&stay, room.price)?,
            stay,
            status,
        };

        match self.store.create(&booking).await {
            Ok(created) => {
                tracing::info!(
                    booking_id = created.id,
                    room_id = created.room_id,
                    check_in = %created.check_in,
                    check_out = %created.check_out,
                    "Booking created"
                );
                Ok(created)
            }
            Err(AppError::OverlapConflict) => {
                tracing::warn!(
                    room_id = booking.room_id,
                    check_in = %booking.stay.check_in(),
                    check_out = %booking.stay.check_out(),
                    "Booking rejected: room already booked"
                );
                Err(AppError::OverlapConflict)
            }
            Err(e) => Err(e),
        }
    }

    /// Update a booking. Managers may change anything; a guest may only
    /// cancel their own booking. Date changes re-price the stay.
    pub async fn update(
        &self,
        session: &SessionClaims,
        id: i32,
        request: UpdateBooking,
    ) -> AppResult<Booking> {
        let existing = self.store.get(id).await?;

        if !session.can(Capability::ManageBookings) {
            let cancel_only = request.status == Some(BookingStatus::Canceled)
                && request.check_in.is_none()
                && request.check_out.is_none()
                && request.guest_name.is_none();
            if !cancel_only || !same_guest(&existing.guest_email, &session.sub) {
                return Err(AppError::Authorization(
                    "Guests may only cancel their own bookings".to_string(),
                ));
            }
        }

        let stay = StayInterval::new(
            request.check_in.unwrap_or(existing.check_in),
            request.check_out.unwrap_or(existing.check_out),
        )?;

        let dates_changed =
            stay.check_in() != existing.check_in || stay.check_out() != existing.check_out;
        let total_price = if dates_changed {
            let room = self.store.get_room(existing.room_id).await?;
            priced_stay(&stay, room.price)?
        } else {
            existing.total_price
        };

        let changes = BookingChanges {
            stay,
            total_price,
            status: request.status.unwrap_or(existing.status),
            guest_name: request.guest_name.or(existing.guest_name),
        };

        let updated = self.store.update(id, &changes).await?;
        tracing::info!(booking_id = id, status = %updated.status.as_str(), "Booking updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await
    }
}
