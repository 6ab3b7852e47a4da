use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use chrono::Utc;
use serde_json::Value;

use crate::auth::AuthUser;
use crate::database::models::Review;
use crate::handlers::utils::{current_user, json_object, restaurant_ref, string_field};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_review;

/// POST /reviews - review a restaurant under the caller's display name
///
/// The restaurant id is not checked against the restaurant collection.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_object(body)?;
    validate_review(&payload)?;

    let restaurant_id = restaurant_ref(&string_field(&payload, "restaurant_id")?);
    let comment = string_field(&payload, "comment")?;
    let rating = payload.get("rating").cloned().unwrap_or(Value::Null);

    let user = current_user(&state, &auth).await?;

    let review = Review {
        user: user.display_name(),
        restaurant_id,
        rating,
        comment,
        timestamp: Utc::now(),
    };
    state.store.insert_review(review).await?;

    Ok(ApiResponse::created(serde_json::json!({ "message": "Review posted successfully!" })))
}
