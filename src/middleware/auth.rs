use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{authorize, RoleRequirement};
use crate::error::ApiError;
use crate::state::AppState;

/// Admit any caller holding a live token; injects `AuthUser` into extensions.
pub async fn require_user(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(&state, RoleRequirement::Authenticated, request, next).await
}

/// Admit only admins; injects `AuthUser` into extensions.
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    gate(&state, RoleRequirement::Admin, request, next).await
}

async fn gate(
    state: &AppState,
    requirement: RoleRequirement,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let outcome = {
        let header = request
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        authorize(header, requirement, &state.tokens)
    };

    match outcome {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            Ok(next.run(request).await)
        }
        Ok(None) => Ok(next.run(request).await),
        Err(err) => {
            tracing::warn!(
                "Rejected {} {}: {:?}",
                request.method(),
                request.uri().path(),
                err
            );
            Err(err.into())
        }
    }
}
