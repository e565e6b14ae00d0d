use abi::{
    Actor, Booking, BookingError, BookingStatus, CancelOutcome, ConfirmOutcome, Receipt, Review,
    Room, RoomQuery, Summary,
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{BookingManager, Bookings, Reports, Reviews, Rooms};

const BOOKING_COLUMNS: &str = "id, user_id, room_id, stay, nightly_rate, status, booked_at";

impl BookingManager {
    async fn booking_by_id(&self, id: Uuid) -> Result<Booking, BookingError> {
        let sql = format!("SELECT {} FROM stayease.bookings WHERE id = $1", BOOKING_COLUMNS);
        sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingError::BookingNotFound(id))
    }

    async fn room_by_id(&self, id: Uuid) -> Result<Room, BookingError> {
        sqlx::query_as("SELECT * FROM stayease.rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(BookingError::RoomNotFound(id))
    }

    async fn set_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<Booking, BookingError> {
        let sql = format!(
            "UPDATE stayease.bookings SET status = $2::stayease.booking_status WHERE id = $1 RETURNING {}",
            BOOKING_COLUMNS
        );
        let booking = sqlx::query_as(&sql)
            .bind(id)
            .bind(status.to_string())
            .fetch_one(&self.pool)
            .await?;

        Ok(booking)
    }
}

#[async_trait]
impl Bookings for BookingManager {
    async fn book(&self, mut booking: Booking) -> Result<Booking, BookingError> {
        booking.validate(Utc::now().date_naive())?;

        let room = self.room_by_id(booking.room_id).await?;
        if !room.is_available {
            return Err(BookingError::RoomClosed(room.id));
        }

        // snapshot the rate so later price edits never rewrite history
        booking.nightly_rate = room.price_per_night;
        booking.status = BookingStatus::Pending;

        // no pre-check: the bookings_no_overlap exclusion constraint makes
        // check-and-insert atomic, and a lost race maps to Conflict
        let row = sqlx::query(
            "INSERT INTO stayease.bookings (user_id, room_id, stay, nightly_rate, status) VALUES ($1, $2, $3, $4, $5::stayease.booking_status) RETURNING id, booked_at",
        )
        .bind(&booking.user_id)
        .bind(booking.room_id)
        .bind(booking.stay())
        .bind(booking.nightly_rate)
        .bind(booking.status.to_string())
        .fetch_one(&self.pool)
        .await?;

        booking.id = row.get(0);
        booking.booked_at = row.get(1);

        info!(
            booking_id = %booking.id,
            room_id = %booking.room_id,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            "booking created"
        );

        Ok(booking)
    }

    async fn is_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, BookingError> {
        let free = sqlx::query_scalar(
            "SELECT NOT EXISTS (SELECT 1 FROM stayease.bookings WHERE room_id = $1 AND status <> 'cancelled' AND stay && $2)",
        )
        .bind(room_id)
        .bind(abi::stay_range(check_in, check_out))
        .fetch_one(&self.pool)
        .await?;

        Ok(free)
    }

    async fn confirm(&self, actor: &Actor, id: Uuid) -> Result<ConfirmOutcome, BookingError> {
        if !actor.is_operator() {
            return Err(BookingError::NotAuthorized);
        }

        let booking = self.booking_by_id(id).await?;
        if booking.status == BookingStatus::Confirmed {
            debug!(booking_id = %id, "booking already confirmed");
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        let next = booking.status.transition(BookingStatus::Confirmed)?;
        let updated = self.set_status(id, next).await?;

        info!(booking_id = %id, "booking confirmed");
        Ok(ConfirmOutcome::Confirmed(updated))
    }

    async fn cancel(&self, actor: &Actor, id: Uuid) -> Result<CancelOutcome, BookingError> {
        let booking = self.booking_by_id(id).await?;
        if !actor.may_manage(&booking) {
            return Err(BookingError::NotAuthorized);
        }

        if booking.status == BookingStatus::Cancelled {
            debug!(booking_id = %id, "booking already cancelled");
            return Ok(CancelOutcome::AlreadyCancelled);
        }

        let next = booking.status.transition(BookingStatus::Cancelled)?;
        let updated = self.set_status(id, next).await?;

        info!(booking_id = %id, "booking cancelled");
        Ok(CancelOutcome::Cancelled(updated))
    }

    async fn get(&self, actor: &Actor, id: Uuid) -> Result<Booking, BookingError> {
        let booking = self.booking_by_id(id).await?;
        if !actor.may_manage(&booking) {
            return Err(BookingError::NotAuthorized);
        }

        Ok(booking)
    }

    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>, BookingError> {
        let sql = format!(
            "SELECT {} FROM stayease.bookings WHERE user_id = $1 ORDER BY lower(stay) DESC",
            BOOKING_COLUMNS
        );
        let bookings = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn active_bookings(&self, room_id: Uuid) -> Result<Vec<Booking>, BookingError> {
        let sql = format!(
            "SELECT {} FROM stayease.bookings WHERE room_id = $1 AND status <> 'cancelled' ORDER BY lower(stay)",
            BOOKING_COLUMNS
        );
        let bookings = sqlx::query_as(&sql)
            .bind(room_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(bookings)
    }

    async fn receipt(&self, actor: &Actor, id: Uuid) -> Result<Receipt, BookingError> {
        let booking = self.booking_by_id(id).await?;
        // receipts go to the booking owner only, operators included out
        if !actor.owns(&booking) {
            return Err(BookingError::NotAuthorized);
        }

        let room = self.room_by_id(booking.room_id).await?;
        Receipt::new(&booking, &room)
    }
}

#[async_trait]
impl Rooms for BookingManager {
    async fn add_room(&self, actor: &Actor, mut room: Room) -> Result<Room, BookingError> {
        if !actor.is_operator() {
            return Err(BookingError::NotAuthorized);
        }

        let id: Uuid = sqlx::query(
            "INSERT INTO stayease.rooms (number, category, beds, capacity, price_per_night, is_available) VALUES ($1, $2::stayease.room_category, $3, $4, $5, $6) RETURNING id",
        )
        .bind(room.number)
        .bind(room.category.to_string())
        .bind(room.beds)
        .bind(room.capacity)
        .bind(room.price_per_night)
        .bind(room.is_available)
        .fetch_one(&self.pool)
        .await?
        .get(0);

        room.id = id;
        info!(room_id = %room.id, number = room.number, "room added");
        Ok(room)
    }

    async fn get_room(&self, id: Uuid) -> Result<Room, BookingError> {
        self.room_by_id(id).await
    }

    async fn query_rooms(&self, query: &RoomQuery) -> Result<Vec<Room>, BookingError> {
        let rooms = sqlx::query_as(
            "SELECT * FROM stayease.rooms \
             WHERE ($1::text IS NULL OR category = $1::stayease.room_category) \
             AND ($2::numeric IS NULL OR price_per_night <= $2) \
             AND ($3::int4 IS NULL OR capacity >= $3) \
             ORDER BY number",
        )
        .bind(query.category.map(|c| c.to_string()))
        .bind(query.max_price)
        .bind(query.min_capacity)
        .fetch_all(&self.pool)
        .await?;

        Ok(rooms)
    }

    async fn set_availability(
        &self,
        actor: &Actor,
        id: Uuid,
        is_available: bool,
    ) -> Result<(), BookingError> {
        if !actor.is_operator() {
            return Err(BookingError::NotAuthorized);
        }

        let result = sqlx::query("UPDATE stayease.rooms SET is_available = $2 WHERE id = $1")
            .bind(id)
            .bind(is_available)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::RoomNotFound(id));
        }

        info!(room_id = %id, is_available, "room availability changed");
        Ok(())
    }

    async fn set_price(
        &self,
        actor: &Actor,
        id: Uuid,
        price: Decimal,
    ) -> Result<(), BookingError> {
        if !actor.is_operator() {
            return Err(BookingError::NotAuthorized);
        }

        let result = sqlx::query("UPDATE stayease.rooms SET price_per_night = $2 WHERE id = $1")
            .bind(id)
            .bind(price)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::RoomNotFound(id));
        }

        info!(room_id = %id, %price, "room price changed");
        Ok(())
    }
}

#[async_trait]
impl Reviews for BookingManager {
    async fn add_review(&self, mut review: Review) -> Result<Review, BookingError> {
        review.validate()?;

        // fail with a domain error rather than a raw FK violation
        self.room_by_id(review.room_id).await?;

        let row = sqlx::query(
            "INSERT INTO stayease.reviews (user_id, room_id, comment, rating) VALUES ($1, $2, $3, $4) RETURNING id, created_at",
        )
        .bind(&review.user_id)
        .bind(review.room_id)
        .bind(&review.comment)
        .bind(review.rating)
        .fetch_one(&self.pool)
        .await?;

        review.id = row.get(0);
        review.created_at = row.get(1);
        review.is_featured = false;

        debug!(review_id = %review.id, room_id = %review.room_id, "review added");
        Ok(review)
    }

    async fn room_reviews(&self, room_id: Uuid) -> Result<Vec<Review>, BookingError> {
        let reviews = sqlx::query_as(
            "SELECT * FROM stayease.reviews WHERE room_id = $1 ORDER BY created_at DESC",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn featured_reviews(&self, limit: i64) -> Result<Vec<Review>, BookingError> {
        let reviews = sqlx::query_as(
            "SELECT * FROM stayease.reviews WHERE is_featured ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn set_featured(
        &self,
        actor: &Actor,
        id: Uuid,
        is_featured: bool,
    ) -> Result<(), BookingError> {
        if !actor.is_operator() {
            return Err(BookingError::NotAuthorized);
        }

        let result = sqlx::query("UPDATE stayease.reviews SET is_featured = $2 WHERE id = $1")
            .bind(id)
            .bind(is_featured)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookingError::ReviewNotFound(id));
        }

        Ok(())
    }
}

#[async_trait]
impl Reports for BookingManager {
    async fn summary(&self) -> Result<Summary, BookingError> {
        let summary = sqlx::query_as(
            "SELECT count(*) AS total_bookings, \
             count(*) FILTER (WHERE status = 'pending') AS pending_bookings, \
             COALESCE(sum((upper(stay) - lower(stay)) * nightly_rate) FILTER (WHERE status = 'confirmed'), 0) AS total_revenue \
             FROM stayease.bookings",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
