use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Bookmark, NewRestaurant, NewUser, Restaurant, Review, User};
use crate::filter::RestaurantFilter;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Duplicate value for {0}")]
    Duplicate(&'static str),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Outcome of the keyed bookmark insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkInsert {
    Created,
    AlreadyExists,
}

/// Document store seam. Every method is a single read or write.
#[async_trait]
pub trait Store: Send + Sync {
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Results are ordered by name.
    async fn find_restaurants(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, StoreError>;

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError>;

    async fn find_restaurants_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Restaurant>, StoreError>;

    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError>;

    async fn distinct_cuisines(&self) -> Result<Vec<String>, StoreError>;

    async fn distinct_dietary(&self) -> Result<Vec<String>, StoreError>;

    /// Oldest first.
    async fn find_reviews(&self, restaurant_id: &str) -> Result<Vec<Review>, StoreError>;

    async fn insert_review(&self, review: Review) -> Result<(), StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Emails compare case-insensitively.
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Fails with `StoreError::Duplicate("email")` when the email is taken.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    /// Atomic conditional insert keyed by (user_id, restaurant_id).
    async fn insert_bookmark(&self, bookmark: Bookmark) -> Result<BookmarkInsert, StoreError>;

    async fn find_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, StoreError>;

    /// Returns whether a bookmark was removed.
    async fn delete_bookmark(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool, StoreError>;
}
