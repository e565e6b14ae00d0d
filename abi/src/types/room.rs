use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_category", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RoomCategory {
    Ac,
    NonAc,
    Deluxe,
    King,
    Queen,
}

impl fmt::Display for RoomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomCategory::Ac => write!(f, "ac"),
            RoomCategory::NonAc => write!(f, "non_ac"),
            RoomCategory::Deluxe => write!(f, "deluxe"),
            RoomCategory::King => write!(f, "king"),
            RoomCategory::Queen => write!(f, "queen"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Room {
    pub id: Uuid,
    pub number: i32,
    pub category: RoomCategory,
    pub beds: i32,
    pub capacity: i32,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl Room {
    /// A new room is open for booking; the id is assigned on insert.
    pub fn new(
        number: i32,
        category: RoomCategory,
        beds: i32,
        capacity: i32,
        price_per_night: Decimal,
    ) -> Self {
        Self {
            id: Uuid::nil(),
            number,
            category,
            beds,
            capacity,
            price_per_night,
            is_available: true,
        }
    }
}
