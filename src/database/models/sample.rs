use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A user-owned card instance: its condition and whether the owner is
/// willing to sell or trade it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Sample {
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
    pub state: String,
    pub wts: bool,
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleNew {
    pub user_id: i64,
    pub card_id: i64,
    pub state: String,
    pub wts: bool,
}

/// Partial-update payload; absent fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SampleUpdate {
    pub user_id: Option<i64>,
    pub card_id: Option<i64>,
    pub state: Option<String>,
    pub wts: Option<bool>,
}

impl SampleUpdate {
    pub fn is_empty(&self) -> bool {
        self.user_id.is_none()
            && self.card_id.is_none()
            && self.state.is_none()
            && self.wts.is_none()
    }
}

/// Response body for a successful insert.
#[derive(Debug, Serialize)]
pub struct NewSampleId {
    pub id: i64,
}
