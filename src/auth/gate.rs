use super::{AuthUser, Role, TokenService};

/// Role a route demands of its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleRequirement {
    None,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateError {
    MissingToken,
    InvalidToken,
    InsufficientRole { required: Role, actual: Role },
}

impl GateError {
    pub fn status_code(&self) -> u16 {
        match self {
            GateError::MissingToken | GateError::InvalidToken => 401,
            GateError::InsufficientRole { .. } => 403,
        }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` value.
///
/// Anything other than exactly that shape counts as no token at all.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let token = header?.strip_prefix("Bearer ")?;
    if token.is_empty() || token.chars().any(char::is_whitespace) {
        return None;
    }
    Some(token)
}

/// Admit or reject a caller. Pure: never touches the user store.
pub fn authorize(
    header: Option<&str>,
    requirement: RoleRequirement,
    tokens: &TokenService,
) -> Result<Option<AuthUser>, GateError> {
    if requirement == RoleRequirement::None {
        return Ok(None);
    }

    let token = extract_bearer(header).ok_or(GateError::MissingToken)?;
    let user = tokens
        .verify(token)
        .map(AuthUser::from)
        .ok_or(GateError::InvalidToken)?;

    if requirement == RoleRequirement::Admin && user.role != Role::Admin {
        return Err(GateError::InsufficientRole {
            required: Role::Admin,
            actual: user.role,
        });
    }

    Ok(Some(user))
}
