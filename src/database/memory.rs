use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Bookmark, NewRestaurant, NewUser, Restaurant, Review, User};
use super::store::{BookmarkInsert, Store, StoreError};
use crate::filter::RestaurantFilter;

#[derive(Default)]
struct Collections {
    restaurants: Vec<Restaurant>,
    reviews: Vec<Review>,
    users: HashMap<Uuid, User>,
    bookmarks: Vec<Bookmark>,
}

/// In-process store for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Matches Postgres `lower(a) = lower(b)`, including non-ASCII letters.
fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn sorted_by_name(mut restaurants: Vec<Restaurant>) -> Vec<Restaurant> {
    restaurants.sort_by(|a, b| a.name.cmp(&b.name));
    restaurants
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_restaurants(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, StoreError> {
        let inner = self.inner.read().await;
        let found = inner
            .restaurants
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(sorted_by_name(found))
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.restaurants.iter().find(|r| r.id == id).cloned())
    }

    async fn find_restaurants_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Restaurant>, StoreError> {
        let inner = self.inner.read().await;
        let found = inner
            .restaurants
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect();
        Ok(sorted_by_name(found))
    }

    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError> {
        let restaurant = restaurant.into_restaurant(Uuid::new_v4());
        self.inner.write().await.restaurants.push(restaurant.clone());
        Ok(restaurant)
    }

    async fn distinct_cuisines(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let values: BTreeSet<String> = inner.restaurants.iter().map(|r| r.cuisine.clone()).collect();
        Ok(values.into_iter().collect())
    }

    async fn distinct_dietary(&self) -> Result<Vec<String>, StoreError> {
        let inner = self.inner.read().await;
        let values: BTreeSet<String> = inner
            .restaurants
            .iter()
            .flat_map(|r| r.dietary.iter().cloned())
            .collect();
        Ok(values.into_iter().collect())
    }

    async fn find_reviews(&self, restaurant_id: &str) -> Result<Vec<Review>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .reviews
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .cloned()
            .collect())
    }

    async fn insert_review(&self, review: Review) -> Result<(), StoreError> {
        self.inner.write().await.reviews.push(review);
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| same_email(&u.email, email))
            .cloned())
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.values().any(|u| same_email(&u.email, &user.email)) {
            return Err(StoreError::Duplicate("email"));
        }
        let stored = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: Utc::now(),
        };
        inner.users.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn insert_bookmark(&self, bookmark: Bookmark) -> Result<BookmarkInsert, StoreError> {
        // Check and insert under one write lock.
        let mut inner = self.inner.write().await;
        let exists = inner
            .bookmarks
            .iter()
            .any(|b| b.user_id == bookmark.user_id && b.restaurant_id == bookmark.restaurant_id);
        if exists {
            return Ok(BookmarkInsert::AlreadyExists);
        }
        inner.bookmarks.push(bookmark);
        Ok(BookmarkInsert::Created)
    }

    async fn find_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .bookmarks
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_bookmark(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.bookmarks.len();
        inner
            .bookmarks
            .retain(|b| !(b.user_id == user_id && b.restaurant_id == restaurant_id));
        Ok(inner.bookmarks.len() < before)
    }
}
