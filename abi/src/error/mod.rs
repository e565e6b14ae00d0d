mod conflict;

use thiserror::Error;
use uuid::Uuid;

pub use conflict::*;

use crate::BookingStatus;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("unknown error")]
    Unknown,

    #[error("check-out must be after check-in")]
    InvalidDateRange,

    #[error("check-in date is in the past")]
    CheckInPast,

    #[error("invalid user id: {0}")]
    InvalidUserId(String),

    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(i32),

    #[error("room not found: {0}")]
    RoomNotFound(Uuid),

    #[error("room is closed for booking: {0}")]
    RoomClosed(Uuid),

    #[error("booking not found: {0}")]
    BookingNotFound(Uuid),

    #[error("review not found: {0}")]
    ReviewNotFound(Uuid),

    #[error("booking conflict")]
    Conflict(BookingConflictInfo),

    #[error("actor is not authorized for this operation")]
    NotAuthorized,

    #[error("stay must be at least one night")]
    InvalidRange,

    #[error("status transition {0} -> {1} is not allowed")]
    InvalidTransition(BookingStatus, BookingStatus),

    #[error("failed to render receipt: {0}")]
    ReceiptRender(String),

    #[error("db error: {0}")]
    DbError(sqlx::Error),
}

impl PartialEq for BookingError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // sqlx errors carry no equality; any two count as equal here
            (Self::DbError(_), Self::DbError(_)) => true,
            (Self::Unknown, Self::Unknown) => true,
            (Self::InvalidDateRange, Self::InvalidDateRange) => true,
            (Self::CheckInPast, Self::CheckInPast) => true,
            (Self::InvalidUserId(v1), Self::InvalidUserId(v2)) => v1 == v2,
            (Self::InvalidRating(v1), Self::InvalidRating(v2)) => v1 == v2,
            (Self::RoomNotFound(v1), Self::RoomNotFound(v2)) => v1 == v2,
            (Self::RoomClosed(v1), Self::RoomClosed(v2)) => v1 == v2,
            (Self::BookingNotFound(v1), Self::BookingNotFound(v2)) => v1 == v2,
            (Self::ReviewNotFound(v1), Self::ReviewNotFound(v2)) => v1 == v2,
            (Self::Conflict(v1), Self::Conflict(v2)) => v1 == v2,
            (Self::NotAuthorized, Self::NotAuthorized) => true,
            (Self::InvalidRange, Self::InvalidRange) => true,
            (Self::InvalidTransition(f1, t1), Self::InvalidTransition(f2, t2)) => {
                f1 == f2 && t1 == t2
            }
            (Self::ReceiptRender(v1), Self::ReceiptRender(v2)) => v1 == v2,
            _ => false,
        }
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Database(e) => {
                let err = e.downcast_ref::<sqlx::postgres::PgDatabaseError>();
                match (err.code(), err.schema(), err.table()) {
                    // 23P01: the bookings_no_overlap exclusion constraint fired
                    ("23P01", Some("stayease"), Some("bookings")) => {
                        let detail = err.detail().unwrap_or_default();
                        Self::Conflict(detail.parse().unwrap())
                    }
                    _ => Self::DbError(sqlx::Error::Database(e)),
                }
            }
            _ => Self::DbError(e),
        }
    }
}
