mod actor;
mod booking;
mod booking_status;
mod review;
mod room;
mod room_query;
mod summary;

use std::ops::Bound;

use chrono::NaiveDate;
use sqlx::postgres::types::PgRange;

pub use actor::*;
pub use booking::*;
pub use booking_status::*;
pub use review::*;
pub use room::*;
pub use room_query::*;
pub use summary::*;

use crate::BookingError;

/// Half-open overlap test over [check_in, check_out) windows. Back-to-back
/// stays (one ending the day another begins) do not overlap.
pub fn overlaps(
    a_check_in: NaiveDate,
    a_check_out: NaiveDate,
    b_check_in: NaiveDate,
    b_check_out: NaiveDate,
) -> bool {
    a_check_in < b_check_out && a_check_out > b_check_in
}

/// Ordered validation rules for a candidate stay; the first violated rule
/// wins.
pub fn validate_stay(
    check_in: NaiveDate,
    check_out: NaiveDate,
    today: NaiveDate,
) -> Result<(), BookingError> {
    if check_out <= check_in {
        return Err(BookingError::InvalidDateRange);
    }

    if check_in < today {
        return Err(BookingError::CheckInPast);
    }

    Ok(())
}

pub fn stay_range(check_in: NaiveDate, check_out: NaiveDate) -> PgRange<NaiveDate> {
    PgRange {
        start: Bound::Included(check_in),
        end: Bound::Excluded(check_out),
    }
}

/// Recover (check_in, check_out) from a stored daterange. Postgres
/// canonicalizes daterange to inclusive-start/exclusive-end bounds.
pub fn stay_dates(range: &PgRange<NaiveDate>) -> Option<(NaiveDate, NaiveDate)> {
    match (range.start, range.end) {
        (Bound::Included(start), Bound::Excluded(end)) => Some((start, end)),
        _ => None,
    }
}
