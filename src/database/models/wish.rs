use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user's standing request for a specific card.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Wish {
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct WishNew {
    pub user_id: i64,
    pub card_id: i64,
}

/// Partial-update payload; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WishUpdate {
    pub user_id: Option<i64>,
    pub card_id: Option<i64>,
}

impl WishUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none() && self.card_id.is_none()
    }
}

/// Response body for a successful insert.
#[derive(Debug, Serialize)]
pub struct NewWishId {
    pub id: i64,
}
