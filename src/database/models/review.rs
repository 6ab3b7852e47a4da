use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Display name of the author at the time of posting.
    pub user: String,
    pub restaurant_id: String,
    /// Stored exactly as the client sent it.
    pub rating: Value,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}
