use core::fmt;

use crate::BookingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Allowed transitions: pending -> confirmed, pending -> cancelled,
    /// confirmed -> cancelled. Cancelled is terminal.
    pub fn transition(self, next: BookingStatus) -> Result<BookingStatus, BookingError> {
        use BookingStatus::*;

        match (self, next) {
            (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => Ok(next),
            (from, to) => Err(BookingError::InvalidTransition(from, to)),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_transitions_should_pass() {
        use BookingStatus::*;

        assert_eq!(Pending.transition(Confirmed), Ok(Confirmed));
        assert_eq!(Pending.transition(Cancelled), Ok(Cancelled));
        assert_eq!(Confirmed.transition(Cancelled), Ok(Cancelled));
    }

    #[test]
    fn cancelled_is_terminal() {
        use BookingStatus::*;

        assert_eq!(
            Cancelled.transition(Pending),
            Err(BookingError::InvalidTransition(Cancelled, Pending))
        );
        assert_eq!(
            Cancelled.transition(Confirmed),
            Err(BookingError::InvalidTransition(Cancelled, Confirmed))
        );
    }

    #[test]
    fn no_way_back_to_pending() {
        use BookingStatus::*;

        assert_eq!(
            Confirmed.transition(Pending),
            Err(BookingError::InvalidTransition(Confirmed, Pending))
        );
    }
}
