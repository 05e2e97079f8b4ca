//! Stay price calculation
//!
//! Prices are whole nights times the nightly rate, in decimal arithmetic.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::availability::{InvalidIntervalError, StayInterval};

/// Calendar nights between two dates; negative when inverted.
pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days()
}

/// Price of a validated stay, rounded to cents
pub fn stay_price(stay: &StayInterval, nightly_rate: Decimal) -> Decimal {
    (Decimal::from(stay.nights()) * nightly_rate)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Price of a stay; same-day or inverted ranges are rejected instead of priced at zero.
pub fn compute_stay_price(
    check_in: NaiveDate,
    check_out: NaiveDate,
    nightly_rate: Decimal,
) -> Result<Decimal, InvalidIntervalError> {
    let stay = StayInterval::new(check_in, check_out)?;
    Ok(stay_price(&stay, nightly_rate))
}
