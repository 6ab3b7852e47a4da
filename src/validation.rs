//! Field-presence and value checks for write payloads.
//!
//! Every check runs over a fixed field list so the first reported failure is
//! the same for the same payload. Nothing here touches the store.

use serde_json::{Map, Value};
use thiserror::Error;

pub const RESTAURANT_FIELDS: [&str; 8] = [
    "name", "cuisine", "type", "dietary", "rating", "location", "address", "contact",
];

pub const REVIEW_FIELDS: [&str; 3] = ["restaurant_id", "rating", "comment"];

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn missing(field: &str) -> Self {
        Self::new(field, format!("Missing field: {}", field))
    }
}

fn is_present(payload: &Payload, field: &str) -> bool {
    !matches!(payload.get(field), None | Some(Value::Null))
}

fn require_all(payload: &Payload, fields: &[&str]) -> Result<(), ValidationError> {
    match fields.iter().find(|field| !is_present(payload, field)) {
        Some(field) => Err(ValidationError::missing(field)),
        None => Ok(()),
    }
}

fn require_string<'a>(payload: &'a Payload, field: &str) -> Result<&'a str, ValidationError> {
    match payload.get(field) {
        None | Some(Value::Null) => Err(ValidationError::missing(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ValidationError::new(field, format!("{} must be a string", field))),
    }
}

/// Presence first, then per-field types in `RESTAURANT_FIELDS` order.
///
/// `dietary` may be a list of strings or a single string tag.
pub fn validate_restaurant(payload: &Payload) -> Result<(), ValidationError> {
    require_all(payload, &RESTAURANT_FIELDS)?;

    for field in RESTAURANT_FIELDS {
        let value = payload.get(field).unwrap_or(&Value::Null);
        match field {
            "dietary" => check_dietary(value)?,
            "rating" => match value.as_f64() {
                Some(rating) if rating >= 0.0 => {}
                _ => return Err(ValidationError::new("rating", "Invalid rating value")),
            },
            _ => {
                require_string(payload, field)?;
            }
        }
    }

    match payload.get("website") {
        None | Some(Value::Null) | Some(Value::String(_)) => Ok(()),
        Some(_) => Err(ValidationError::new("website", "website must be a string")),
    }
}

fn check_dietary(value: &Value) -> Result<(), ValidationError> {
    let ok = match value {
        Value::String(_) => true,
        Value::Array(tags) => tags.iter().all(Value::is_string),
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(ValidationError::new("dietary", "dietary must be a list of strings"))
    }
}

/// Presence only; rating is stored as sent.
pub fn validate_review(payload: &Payload) -> Result<(), ValidationError> {
    require_all(payload, &REVIEW_FIELDS)
}

pub fn validate_bookmark(payload: &Payload) -> Result<(), ValidationError> {
    match payload.get("restaurant_id") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::new("restaurant_id", "restaurant_id is required")),
    }
}

pub fn validate_login(payload: &Payload) -> Result<(), ValidationError> {
    require_string(payload, "email")?;
    require_string(payload, "password")?;
    Ok(())
}

pub fn validate_registration(payload: &Payload) -> Result<(), ValidationError> {
    let email = require_string(payload, "email")?;
    let password = require_string(payload, "password")?;

    validate_email_format(email).map_err(|msg| ValidationError::new("email", msg))?;

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::new(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
        ));
    }

    for field in ["first_name", "last_name"] {
        match payload.get(field) {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(_) => return Err(ValidationError::new(field, format!("{} must be a string", field))),
        }
    }

    Ok(())
}

fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err("Invalid email format".to_string());
    }

    let domain = parts[1];
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err("Invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}
