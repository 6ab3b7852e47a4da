use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::database::models::{Restaurant, RestaurantDetail};
use crate::error::ApiError;
use crate::filter::RestaurantFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

async fn find(state: &AppState, filter: RestaurantFilter) -> ApiResult<Vec<Restaurant>> {
    let restaurants = state.store.find_restaurants(&filter).await?;
    Ok(ApiResponse::success(restaurants))
}

/// GET /restaurants - every restaurant
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Restaurant>> {
    find(&state, RestaurantFilter::default()).await
}

/// GET /restaurants/:id - one restaurant with all of its reviews
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<RestaurantDetail> {
    let not_found = || ApiError::not_found("Restaurant not found");

    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    let restaurant = state.store.find_restaurant(id).await?.ok_or_else(not_found)?;
    let reviews = state.store.find_reviews(&id.to_string()).await?;

    Ok(ApiResponse::success(RestaurantDetail { restaurant, reviews }))
}

/// GET /restaurants/cuisine/:cuisine
pub async fn by_cuisine(State(state): State<AppState>, Path(cuisine): Path<String>) -> ApiResult<Vec<Restaurant>> {
    find(&state, RestaurantFilter::by_cuisine(cuisine)).await
}

/// GET /restaurants/diet/:diet
pub async fn by_diet(State(state): State<AppState>, Path(diet): Path<String>) -> ApiResult<Vec<Restaurant>> {
    find(&state, RestaurantFilter::by_diet(diet)).await
}

/// GET /restaurants/location/:location
pub async fn by_location(State(state): State<AppState>, Path(location): Path<String>) -> ApiResult<Vec<Restaurant>> {
    find(&state, RestaurantFilter::by_location(location)).await
}

/// GET /restaurants/filter?cuisine=&diet=&location=
pub async fn filter(State(state): State<AppState>, Query(filter): Query<RestaurantFilter>) -> ApiResult<Vec<Restaurant>> {
    find(&state, filter.normalized()).await
}

/// GET /cuisines
pub async fn cuisines(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(ApiResponse::success(state.store.distinct_cuisines().await?))
}

/// GET /dietary-preferences
pub async fn dietary_preferences(State(state): State<AppState>) -> ApiResult<Vec<String>> {
    Ok(ApiResponse::success(state.store.distinct_dietary().await?))
}
