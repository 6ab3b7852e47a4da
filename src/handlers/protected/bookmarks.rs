use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::database::{models::{Bookmark, Restaurant}, BookmarkInsert};
use crate::error::ApiError;
use crate::handlers::utils::{caller_id, current_user, json_object, restaurant_ref, string_field};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_bookmark;

/// POST /bookmarks - bookmark a restaurant; repeating it is a no-op success
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_object(body)?;
    validate_bookmark(&payload)?;
    let restaurant_id = restaurant_ref(&string_field(&payload, "restaurant_id")?);

    let user = current_user(&state, &auth).await?;

    let bookmark = Bookmark {
        user_id: user.id,
        restaurant_id,
        email: user.email,
        timestamp: Utc::now(),
    };

    match state.store.insert_bookmark(bookmark).await? {
        BookmarkInsert::Created => Ok(ApiResponse::with_status(
            json!({ "message": "Restaurant bookmarked!" }),
            StatusCode::CREATED,
        )),
        BookmarkInsert::AlreadyExists => Ok(ApiResponse::message("Already bookmarked")),
    }
}

/// GET /bookmarks - the caller's bookmarked restaurants
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<Vec<Restaurant>> {
    let user_id = caller_id(&auth)?;
    let bookmarks = state.store.find_bookmarks(user_id).await?;

    // Bookmarks may name ids that were never restaurants; those simply drop out.
    let ids: Vec<Uuid> = bookmarks
        .iter()
        .filter_map(|b| Uuid::parse_str(&b.restaurant_id).ok())
        .collect();

    Ok(ApiResponse::success(state.store.find_restaurants_by_ids(&ids).await?))
}

/// DELETE /bookmarks/:restaurant_id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(restaurant_id): Path<String>,
) -> ApiResult<Value> {
    let user_id = caller_id(&auth)?;

    if state.store.delete_bookmark(user_id, &restaurant_ref(&restaurant_id)).await? {
        Ok(ApiResponse::message("Bookmark removed."))
    } else {
        Err(ApiError::not_found("Bookmark not found"))
    }
}
