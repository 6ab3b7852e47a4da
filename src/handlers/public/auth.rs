// handlers/public/auth.rs - token acquisition and account creation
//
// Neither route requires a token. Registration always creates `user` accounts;
// admins are provisioned with the `create-admin` command.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::{json, Value};

use crate::auth::{hash_password, verify_password, Role};
use crate::database::{models::NewUser, StoreError};
use crate::error::ApiError;
use crate::handlers::utils::{json_object, string_field};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::{validate_login, validate_registration};

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}

/// POST /auth/login - exchange email + password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_object(body)?;
    validate_login(&payload)?;

    let email = string_field(&payload, "email")?;
    let password = string_field(&payload, "password")?;

    let Some(user) = state.store.find_user_by_email(email.trim()).await? else {
        tracing::warn!("Login failed: no account for {}", email);
        return Err(invalid_credentials());
    };

    if !verify_password(&password, &user.password_hash)? {
        tracing::warn!("Login failed: wrong password for {}", email);
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&user.id.to_string(), user.role)?;
    tracing::info!("User {} logged in as {}", user.id, user.role);

    Ok(ApiResponse::success(json!({
        "message": "Login successful!",
        "token": token,
        "role": user.role,
    })))
}

/// POST /auth/register - create a `user` account
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let payload = json_object(body)?;
    validate_registration(&payload)?;

    let optional = |field: &str| {
        payload
            .get(field)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    };

    let new_user = NewUser {
        email: string_field(&payload, "email")?.trim().to_string(),
        password_hash: hash_password(&string_field(&payload, "password")?)?,
        role: Role::User,
        first_name: optional("first_name"),
        last_name: optional("last_name"),
    };

    let user = match state.store.insert_user(new_user).await {
        Ok(user) => user,
        Err(StoreError::Duplicate(_)) => return Err(ApiError::bad_request("Email already registered")),
        Err(e) => return Err(e.into()),
    };

    tracing::info!("Registered user {}", user.id);
    Ok(ApiResponse::created(json!({
        "message": "User registered successfully!",
        "id": user.id,
    })))
}
