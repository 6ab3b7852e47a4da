use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, postgres::PgRow, PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::models::{Bookmark, NewRestaurant, NewUser, Restaurant, Review, User};
use super::store::{BookmarkInsert, Store, StoreError};
use crate::auth::Role;
use crate::config::DatabaseConfig;
use crate::filter::{FilterWhere, RestaurantFilter};

const RESTAURANT_COLUMNS: &str =
    "id, name, cuisine, kind, dietary, rating, location, address, contact, website";

const USER_COLUMNS: &str = "id, email, password_hash, role, first_name, last_name, created_at";

/// Postgres-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        info!("Connected to database with {} max connections", config.max_connections);
        Ok(Self { pool })
    }
}

fn restaurant_from_row(row: &PgRow) -> Result<Restaurant, StoreError> {
    Ok(Restaurant {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        cuisine: row.try_get("cuisine")?,
        kind: row.try_get("kind")?,
        dietary: row.try_get("dietary")?,
        rating: row.try_get("rating")?,
        location: row.try_get("location")?,
        address: row.try_get("address")?,
        contact: row.try_get("contact")?,
        website: row.try_get("website")?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, StoreError> {
    let role: String = row.try_get("role")?;
    let role = Role::parse(&role).ok_or_else(|| StoreError::Corrupt(format!("unknown role '{}'", role)))?;

    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at: row.try_get("created_at")?,
    })
}

fn review_from_row(row: &PgRow) -> Result<Review, StoreError> {
    Ok(Review {
        user: row.try_get("author")?,
        restaurant_id: row.try_get("restaurant_id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        timestamp: row.try_get("created_at")?,
    })
}

fn bookmark_from_row(row: &PgRow) -> Result<Bookmark, StoreError> {
    Ok(Bookmark {
        user_id: row.try_get("user_id")?,
        restaurant_id: row.try_get("restaurant_id")?,
        email: row.try_get("email")?,
        timestamp: row.try_get("created_at")?,
    })
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_restaurants(&self, filter: &RestaurantFilter) -> Result<Vec<Restaurant>, StoreError> {
        let (where_clause, params) = FilterWhere::generate(filter, 0);
        let sql = format!(
            "SELECT {} FROM restaurants WHERE {} ORDER BY name, id",
            RESTAURANT_COLUMNS, where_clause
        );

        let mut query = sqlx::query(&sql);
        for param in params {
            query = query.bind(param);
        }

        let rows = query.fetch_all(&self.pool).await?;
        rows.iter().map(restaurant_from_row).collect()
    }

    async fn find_restaurant(&self, id: Uuid) -> Result<Option<Restaurant>, StoreError> {
        let sql = format!("SELECT {} FROM restaurants WHERE id = $1", RESTAURANT_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(restaurant_from_row).transpose()
    }

    async fn find_restaurants_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Restaurant>, StoreError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let sql = format!(
            "SELECT {} FROM restaurants WHERE id = ANY($1) ORDER BY name, id",
            RESTAURANT_COLUMNS
        );
        let rows = sqlx::query(&sql).bind(ids).fetch_all(&self.pool).await?;
        rows.iter().map(restaurant_from_row).collect()
    }

    async fn insert_restaurant(&self, restaurant: NewRestaurant) -> Result<Restaurant, StoreError> {
        let restaurant = restaurant.into_restaurant(Uuid::new_v4());
        sqlx::query(
            "INSERT INTO restaurants (id, name, cuisine, kind, dietary, rating, location, address, contact, website) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(restaurant.id)
        .bind(&restaurant.name)
        .bind(&restaurant.cuisine)
        .bind(&restaurant.kind)
        .bind(&restaurant.dietary)
        .bind(restaurant.rating)
        .bind(&restaurant.location)
        .bind(&restaurant.address)
        .bind(&restaurant.contact)
        .bind(&restaurant.website)
        .execute(&self.pool)
        .await?;
        Ok(restaurant)
    }

    async fn distinct_cuisines(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT DISTINCT cuisine FROM restaurants ORDER BY cuisine")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get("cuisine").map_err(StoreError::from))
            .collect()
    }

    async fn distinct_dietary(&self) -> Result<Vec<String>, StoreError> {
        let rows = sqlx::query("SELECT DISTINCT unnest(dietary) AS tag FROM restaurants ORDER BY tag")
            .fetch_all(&self.pool)
            .await?;
        rows.iter()
            .map(|row| row.try_get("tag").map_err(StoreError::from))
            .collect()
    }

    async fn find_reviews(&self, restaurant_id: &str) -> Result<Vec<Review>, StoreError> {
        let rows = sqlx::query(
            "SELECT author, restaurant_id, rating, comment, created_at \
             FROM reviews WHERE restaurant_id = $1 ORDER BY created_at, id",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(review_from_row).collect()
    }

    async fn insert_review(&self, review: Review) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO reviews (author, restaurant_id, rating, comment, created_at) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(&review.user)
        .bind(&review.restaurant_id)
        .bind(&review.rating)
        .bind(&review.comment)
        .bind(review.timestamp)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE lower(email) = lower($1)", USER_COLUMNS);
        let row = sqlx::query(&sql).bind(email).fetch_optional(&self.pool).await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let sql = format!(
            "INSERT INTO users (id, email, password_hash, role, first_name, last_name) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.first_name)
            .bind(&user.last_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Duplicate("email")
                } else {
                    StoreError::Sqlx(e)
                }
            })?;
        user_from_row(&row)
    }

    async fn insert_bookmark(&self, bookmark: Bookmark) -> Result<BookmarkInsert, StoreError> {
        let result = sqlx::query(
            "INSERT INTO bookmarks (user_id, restaurant_id, email, created_at) \
             VALUES ($1, $2, $3, $4) ON CONFLICT (user_id, restaurant_id) DO NOTHING",
        )
        .bind(bookmark.user_id)
        .bind(&bookmark.restaurant_id)
        .bind(&bookmark.email)
        .bind(bookmark.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 1 {
            BookmarkInsert::Created
        } else {
            BookmarkInsert::AlreadyExists
        })
    }

    async fn find_bookmarks(&self, user_id: Uuid) -> Result<Vec<Bookmark>, StoreError> {
        let rows = sqlx::query(
            "SELECT user_id, restaurant_id, email, created_at \
             FROM bookmarks WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(bookmark_from_row).collect()
    }

    async fn delete_bookmark(&self, user_id: Uuid, restaurant_id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND restaurant_id = $2")
            .bind(user_id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
