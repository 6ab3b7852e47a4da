use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Keyed by (user_id, restaurant_id); email is denormalized from the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bookmark {
    pub user_id: Uuid,
    pub restaurant_id: String,
    pub email: String,
    pub timestamp: DateTime<Utc>,
}
