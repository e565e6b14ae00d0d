use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Operator dashboard aggregate. Revenue counts confirmed bookings only.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Summary {
    pub total_bookings: i64,
    pub pending_bookings: i64,
    pub total_revenue: Decimal,
}
