use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::database::models::NewRestaurant;
use crate::error::ApiError;
use crate::handlers::utils::json_object;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::validate_restaurant;

/// POST /restaurants - add a restaurant (admin only)
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_object(body)?;
    validate_restaurant(&payload)?;

    let new_restaurant: NewRestaurant = serde_json::from_value(Value::Object(payload))
        .map_err(|e| ApiError::validation_error(format!("Invalid restaurant payload: {}", e), None))?;

    let restaurant = state.store.insert_restaurant(new_restaurant).await?;
    tracing::info!("Admin {} added restaurant {} ({})", auth.user_id, restaurant.id, restaurant.name);

    Ok(ApiResponse::created(json!({
        "message": "Restaurant added successfully!",
        "id": restaurant.id,
    })))
}
