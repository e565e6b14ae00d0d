use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{postgres::types::PgRange, postgres::PgRow, FromRow, Row};
use uuid::Uuid;

use crate::{stay_dates, stay_range, validate_stay, BookingError, BookingStatus, Room};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: String,
    pub room_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Price snapshot taken at booking time; later room price edits never
    /// change historical cost figures.
    pub nightly_rate: Decimal,
    pub status: BookingStatus,
    pub booked_at: DateTime<Utc>,
}

impl Booking {
    /// Candidate booking before persistence; id, rate and timestamp are
    /// filled in on insert.
    pub fn new_pending(
        user_id: impl Into<String>,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            user_id: user_id.into(),
            room_id,
            check_in,
            check_out,
            nightly_rate: Decimal::ZERO,
            status: BookingStatus::Pending,
            booked_at: Utc::now(),
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), BookingError> {
        if self.user_id.is_empty() {
            return Err(BookingError::InvalidUserId(self.user_id.clone()));
        }

        validate_stay(self.check_in, self.check_out, today)
    }

    pub fn stay(&self) -> PgRange<NaiveDate> {
        stay_range(self.check_in, self.check_out)
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Recomputed on demand from the rate snapshot, never stored. A stay of
    /// zero or negative length cannot be created through validation, but
    /// hand-edited rows must not produce a silent zero.
    pub fn total_cost(&self) -> Result<Decimal, BookingError> {
        let nights = self.nights();
        if nights <= 0 {
            return Err(BookingError::InvalidRange);
        }

        Ok(Decimal::from(nights) * self.nightly_rate)
    }
}

impl FromRow<'_, PgRow> for Booking {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let stay: PgRange<NaiveDate> = row.try_get("stay")?;
        let (check_in, check_out) =
            stay_dates(&stay).ok_or_else(|| sqlx::Error::ColumnDecode {
                index: "stay".into(),
                source: "unexpected daterange bounds".into(),
            })?;

        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            room_id: row.try_get("room_id")?,
            check_in,
            check_out,
            nightly_rate: row.try_get("nightly_rate")?,
            status: row.try_get("status")?,
            booked_at: row.try_get("booked_at")?,
        })
    }
}

/// Read-only snapshot handed to the external receipt renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub booking_id: Uuid,
    pub user_id: String,
    pub room_number: i32,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: i64,
    pub nightly_rate: Decimal,
    pub total_cost: Decimal,
}

impl Receipt {
    pub fn new(booking: &Booking, room: &Room) -> Result<Self, BookingError> {
        Ok(Self {
            booking_id: booking.id,
            user_id: booking.user_id.clone(),
            room_number: room.number,
            check_in: booking.check_in,
            check_out: booking.check_out,
            nights: booking.nights(),
            nightly_rate: booking.nightly_rate,
            total_cost: booking.total_cost()?,
        })
    }
}

/// Distinguishes a real cancellation from the idempotent no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum CancelOutcome {
    Cancelled(Booking),
    AlreadyCancelled,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    Confirmed(Booking),
    AlreadyConfirmed,
}
