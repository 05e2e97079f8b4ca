//! Booking calendar
//!
//! Pure date arithmetic behind the booking screens: the month grid, the
//! per-day booking density, the half-open stay overlap test and the stay
//! price. Nothing in here touches the database or the network.

pub mod availability;
pub mod density;
pub mod grid;
pub mod pricing;

pub use availability::{has_overlap, intervals_overlap, InvalidIntervalError, Occupancy, StayInterval};
pub use density::{annotate, booking_count_for_day, date_key, density_map, BookingDensity};
pub use grid::{build_month_grid, days_in_month, weeks, CalendarCell, CalendarDay, CalendarMonth};
pub use pricing::{compute_stay_price, nights_between, stay_price};
