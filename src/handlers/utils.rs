use axum::{extract::rejection::JsonRejection, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::database::models::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation::Payload;

/// Unwrap a JSON body that must be an object.
pub fn json_object(body: Result<Json<Value>, JsonRejection>) -> Result<Payload, ApiError> {
    let Json(value) = body.map_err(|rejection| ApiError::invalid_json(rejection.body_text()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::invalid_json("Request body must be a JSON object")),
    }
}

/// The token's user id as a UUID. Our tokens always carry one.
pub fn caller_id(auth: &AuthUser) -> Result<Uuid, ApiError> {
    Uuid::parse_str(&auth.user_id).map_err(|_| ApiError::unauthorized("Login required"))
}

/// Load the caller's account; a token for a vanished account is treated as unauthenticated.
pub async fn current_user(state: &AppState, auth: &AuthUser) -> Result<User, ApiError> {
    let id = caller_id(auth)?;
    match state.store.find_user(id).await? {
        Some(user) => Ok(user),
        None => {
            tracing::warn!("Token for unknown user {}", id);
            Err(ApiError::unauthorized("Login required"))
        }
    }
}

/// String field that the validator has already confirmed is present.
pub fn string_field(payload: &Payload, field: &str) -> Result<String, ApiError> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        _ => Err(crate::validation::ValidationError {
            field: field.to_string(),
            message: format!("{} must be a string", field),
        }
        .into()),
    }
}

/// Restaurant reference as stored on reviews and bookmarks.
///
/// Anything that parses as a UUID is rewritten to the hyphenated lowercase
/// form restaurant ids are rendered in; other values are kept, trimmed.
pub fn restaurant_ref(raw: &str) -> String {
    let raw = raw.trim();
    match Uuid::parse_str(raw) {
        Ok(id) => id.to_string(),
        Err(_) => raw.to_string(),
    }
}
