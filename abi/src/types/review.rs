use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::BookingError;

/// Reviews are not tied to completed stays; any authenticated user may
/// review any room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    pub user_id: String,
    pub room_id: Uuid,
    pub comment: String,
    pub rating: i32,
    pub created_at: DateTime<Utc>,
    pub is_featured: bool,
}

impl Review {
    pub fn new(
        user_id: impl Into<String>,
        room_id: Uuid,
        rating: i32,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            user_id: user_id.into(),
            room_id,
            comment: comment.into(),
            rating,
            created_at: Utc::now(),
            is_featured: false,
        }
    }

    pub fn validate(&self) -> Result<(), BookingError> {
        if self.user_id.is_empty() {
            return Err(BookingError::InvalidUserId(self.user_id.clone()));
        }

        if !(1..=5).contains(&self.rating) {
            return Err(BookingError::InvalidRating(self.rating));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_bounds_should_hold() {
        for rating in 1..=5 {
            let review = Review::new("alice", Uuid::new_v4(), rating, "nice stay");
            assert_eq!(review.validate(), Ok(()));
        }

        let low = Review::new("alice", Uuid::new_v4(), 0, "bad");
        assert_eq!(low.validate(), Err(BookingError::InvalidRating(0)));

        let high = Review::new("alice", Uuid::new_v4(), 6, "too good");
        assert_eq!(high.validate(), Err(BookingError::InvalidRating(6)));
    }

    #[test]
    fn new_review_is_not_featured() {
        let review = Review::new("alice", Uuid::new_v4(), 5, "nice stay");
        assert!(!review.is_featured);
    }
}
