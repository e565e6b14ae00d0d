use abi::{
    Actor, Booking, BookingError, CancelOutcome, ConfirmOutcome, DbConfig, Receipt, Review, Room,
    RoomQuery, Summary,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

mod manager;

#[derive(Debug, Clone)]
pub struct BookingManager {
    pool: PgPool,
}

impl BookingManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn from_config(config: &DbConfig) -> Result<Self, BookingError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.to_url())
            .await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
pub trait Bookings {
    /// book a stay; availability check and insert are one atomic unit, a
    /// lost race comes back as BookingError::Conflict
    async fn book(&self, booking: Booking) -> Result<Booking, BookingError>;
    /// read-only availability probe for the same half-open overlap rule the
    /// store enforces
    async fn is_available(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, BookingError>;
    /// confirm a pending booking, operator only; confirming twice is a no-op
    async fn confirm(&self, actor: &Actor, id: Uuid) -> Result<ConfirmOutcome, BookingError>;
    /// cancel a booking as its owner or an operator; cancelling twice is a
    /// no-op
    async fn cancel(&self, actor: &Actor, id: Uuid) -> Result<CancelOutcome, BookingError>;
    /// get a booking by id, owner or operator
    async fn get(&self, actor: &Actor, id: Uuid) -> Result<Booking, BookingError>;
    /// the caller's bookings, newest check-in first
    async fn user_bookings(&self, user_id: &str) -> Result<Vec<Booking>, BookingError>;
    /// non-cancelled bookings for a room, by check-in
    async fn active_bookings(&self, room_id: Uuid) -> Result<Vec<Booking>, BookingError>;
    /// receipt snapshot for the external renderer, owner only
    async fn receipt(&self, actor: &Actor, id: Uuid) -> Result<Receipt, BookingError>;
}

#[async_trait]
pub trait Rooms {
    /// add a room to the catalog, operator only
    async fn add_room(&self, actor: &Actor, room: Room) -> Result<Room, BookingError>;
    /// get a room by id
    async fn get_room(&self, id: Uuid) -> Result<Room, BookingError>;
    /// query the catalog with explicit filter criteria
    async fn query_rooms(&self, query: &RoomQuery) -> Result<Vec<Room>, BookingError>;
    /// soft-open or soft-close a room, operator only
    async fn set_availability(
        &self,
        actor: &Actor,
        id: Uuid,
        is_available: bool,
    ) -> Result<(), BookingError>;
    /// change the nightly price, operator only; existing bookings keep
    /// their rate snapshot
    async fn set_price(&self, actor: &Actor, id: Uuid, price: Decimal)
        -> Result<(), BookingError>;
}

#[async_trait]
pub trait Reviews {
    /// add a review, featured flag always starts false
    async fn add_review(&self, review: Review) -> Result<Review, BookingError>;
    /// reviews for a room, most recent first
    async fn room_reviews(&self, room_id: Uuid) -> Result<Vec<Review>, BookingError>;
    /// operator-curated reviews for the landing surface
    async fn featured_reviews(&self, limit: i64) -> Result<Vec<Review>, BookingError>;
    /// toggle the featured flag, operator only
    async fn set_featured(
        &self,
        actor: &Actor,
        id: Uuid,
        is_featured: bool,
    ) -> Result<(), BookingError>;
}

#[async_trait]
pub trait Reports {
    /// dashboard aggregate; an empty booking set yields zeros
    async fn summary(&self) -> Result<Summary, BookingError>;
}

/// Boundary to the excluded receipt renderer: a snapshot in, a document
/// out. Rendering failures map to BookingError::ReceiptRender.
pub trait ReceiptRenderer {
    fn render(&self, receipt: &Receipt) -> Result<Vec<u8>, BookingError>;
}
