use crate::Booking;

/// Authenticated caller reference handed over by the identity provider.
/// The core never sees credentials, only the id and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Guest,
    Operator,
}

impl Actor {
    pub fn guest(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Guest,
        }
    }

    pub fn operator(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: Role::Operator,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.role == Role::Operator
    }

    pub fn owns(&self, booking: &Booking) -> bool {
        self.user_id == booking.user_id
    }

    /// Owner-or-operator check used by cancel and read paths.
    pub fn may_manage(&self, booking: &Booking) -> bool {
        self.is_operator() || self.owns(booking)
    }
}
