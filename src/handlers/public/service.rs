use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service descriptor
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Restaurant Directory API",
        "version": version,
        "endpoints": {
            "restaurants": "/restaurants[/:id] (public), POST /restaurants (admin)",
            "search": "/restaurants/cuisine/:cuisine, /restaurants/diet/:diet, /restaurants/location/:location, /restaurants/filter (public)",
            "catalogue": "/cuisines, /dietary-preferences (public)",
            "auth": "/auth/register, /auth/login (public)",
            "reviews": "POST /reviews (authenticated)",
            "bookmarks": "/bookmarks[/:restaurant_id] (authenticated)",
        }
    }))
}

/// GET /health - store liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
