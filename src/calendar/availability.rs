//! Date-range availability
//!
//! Stays are half-open `[check_in, check_out)`: the check-out day is free
//! for the next guest.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when check-out is not strictly after check-in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Check-out date {check_out} must be after check-in date {check_in}")]
pub struct InvalidIntervalError {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// A stay of at least one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStay", into = "RawStay")]
pub struct StayInterval {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct RawStay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStay> for StayInterval {
    type Error = InvalidIntervalError;

    fn try_from(raw: RawStay) -> Result<Self, Self::Error> {
        StayInterval::new(raw.check_in, raw.check_out)
    }
}

impl From<StayInterval> for RawStay {
    fn from(stay: StayInterval) -> Self {
        RawStay {
            check_in: stay.check_in,
            check_out: stay.check_out,
        }
    }
}

impl StayInterval {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Result<Self, InvalidIntervalError> {
        if check_out <= check_in {
            return Err(InvalidIntervalError { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    pub fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights, always >= 1
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn overlaps(&self, other: &StayInterval) -> bool {
        intervals_overlap(self.check_in, self.check_out, other.check_in, other.check_out)
    }
}

/// Half-open overlap test: `[a1, a2)` and `[b1, b2)` share a night iff `a1 < b2 && b1 < a2`.
pub fn intervals_overlap(a1: NaiveDate, a2: NaiveDate, b1: NaiveDate, b2: NaiveDate) -> bool {
    a1 < b2 && b1 < a2
}

/// Something that may hold a room for a date range
pub trait Occupancy {
    fn room_id(&self) -> i32;
    fn check_in(&self) -> NaiveDate;
    fn check_out(&self) -> NaiveDate;

    /// Whether this entry currently holds the room (cancelled bookings don't)
    fn holds_room(&self) -> bool {
        true
    }
}

/// Whether any existing entry for `room_id` overlaps the candidate stay.
pub fn has_overlap<'a, T, I>(room_id: i32, candidate: &StayInterval, existing: I) -> bool
where
    T: Occupancy + 'a,
    I: IntoIterator<Item = &'a T>,
{
    existing.into_iter().any(|entry| {
        entry.room_id() == room_id
            && entry.holds_room()
            && intervals_overlap(
                candidate.check_in(),
                candidate.check_out(),
                entry.check_in(),
                entry.check_out(),
            )
    })
}
