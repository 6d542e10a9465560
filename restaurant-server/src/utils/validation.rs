//! Input validation helpers
//!
//! Request bodies derive [`validator::Validate`]; [`ValidatedJson`] runs the
//! derive after deserialization and reports only the first violation so the
//! error body stays a single readable message.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person and food names
pub const MIN_NAME_LEN: u64 = 2;
pub const MAX_NAME_LEN: u64 = 100;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: u64 = 6;
pub const MAX_PASSWORD_LEN: u64 = 128;

// ── Enumerations ────────────────────────────────────────────────────

/// Order item portion sizes
pub const QUANTITIES: [&str; 3] = ["S", "M", "L"];
/// Invoice payment methods (empty means not chosen yet)
pub const PAYMENT_METHODS: [&str; 3] = ["CARD", "CASH", ""];
/// Invoice payment states
pub const PAYMENT_STATUSES: [&str; 2] = ["PENDING", "PAID"];

fn one_of(value: &str, allowed: &[&str], code: &'static str) -> Result<(), ValidationError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        let expected = allowed
            .iter()
            .map(|v| if v.is_empty() { "\"\"" } else { v })
            .collect::<Vec<_>>()
            .join("|");
        Err(ValidationError::new(code).with_message(format!("must be one of {expected}").into()))
    }
}

pub fn validate_quantity(value: &str) -> Result<(), ValidationError> {
    one_of(value, &QUANTITIES, "quantity")
}

pub fn validate_payment_method(value: &str) -> Result<(), ValidationError> {
    one_of(value, &PAYMENT_METHODS, "payment_method")
}

pub fn validate_payment_status(value: &str) -> Result<(), ValidationError> {
    one_of(value, &PAYMENT_STATUSES, "payment_status")
}

/// Reject empty or whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("required").with_message("must not be empty".into()))
    } else {
        Ok(())
    }
}

// ── Error reporting ─────────────────────────────────────────────────

fn describe(error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }
    match error.code.as_ref() {
        "required" => "is required".to_string(),
        "email" => "must be a valid email address".to_string(),
        "length" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("length must be between {min} and {max}"),
            (Some(min), None) => format!("length must be at least {min}"),
            (None, Some(max)) => format!("length must be at most {max}"),
            (None, None) => "has an invalid length".to_string(),
        },
        "range" => match (error.params.get("min"), error.params.get("max")) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            (None, None) => "is out of range".to_string(),
        },
        code => format!("failed validation: {code}"),
    }
}

/// Depth-first search for the first failing field, fields ordered by name
fn first_field_error(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        let found = match kind {
            ValidationErrorsKind::Field(list) => list.first().map(|e| (path, describe(e))),
            ValidationErrorsKind::Struct(inner) => first_field_error(inner, &path),
            ValidationErrorsKind::List(items) => items
                .iter()
                .find_map(|(index, inner)| first_field_error(inner, &format!("{path}[{index}]"))),
        };
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Convert derive errors into a `ValidationFailed` naming the first violation
pub fn first_violation(errors: ValidationErrors) -> AppError {
    match first_field_error(&errors, "") {
        Some((field, message)) => {
            AppError::validation(format!("{field}: {message}")).with_detail("field", field)
        }
        None => AppError::validation(errors.to_string()),
    }
}

/// Validate a payload outside of the extractor (e.g. items built in code)
pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate().map_err(first_violation)
}

/// Read an update patch as a create payload
///
/// Used when `?upsert=true` targets a missing document: the patch must then
/// carry every field creation requires.
pub fn patch_as_create<P, C>(patch: &P) -> Result<C, AppError>
where
    P: Serialize,
    C: DeserializeOwned + Validate,
{
    let value = serde_json::to_value(patch).map_err(|e| AppError::internal(e.to_string()))?;
    let payload: C = serde_json::from_value(value).map_err(|e| AppError::validation(e.to_string()))?;
    validate_payload(&payload)?;
    Ok(payload)
}

// ── Extractor ───────────────────────────────────────────────────────

/// JSON body extractor that also runs `Validate`
///
/// Malformed JSON and failed validation both map to `ValidationFailed` (400)
/// with the standard error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        validate_payload(&value)?;
        Ok(Self(value))
    }
}
