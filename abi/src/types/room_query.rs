use derive_builder::Builder;
use rust_decimal::Decimal;

use crate::RoomCategory;

/// Explicit filter criteria for the room catalog; every field is optional
/// and unset fields match everything.
#[derive(Debug, Clone, Default, Builder)]
#[builder(setter(into, strip_option), default)]
pub struct RoomQuery {
    pub category: Option<RoomCategory>,
    pub max_price: Option<Decimal>,
    pub min_capacity: Option<i32>,
}
