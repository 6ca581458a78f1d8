//! Field validators shared by the form payloads in `models`, and the `ValidatedJson`
//! extractor that runs them before a handler sees the body.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;

/// Lowercase kebab-case: `global-equity-fund`, no leading/trailing/double dashes.
pub fn validate_slug(value: &str) -> Result<(), ValidationError> {
    let well_formed = !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("must be lowercase letters, digits and single dashes".into()))
    }
}

/// Fund codes are short uppercase identifiers such as `AMC-EQ01`.
pub fn validate_fund_code(value: &str) -> Result<(), ValidationError> {
    let well_formed = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("fund_code")
            .with_message("must be uppercase letters, digits and dashes".into()))
    }
}

pub fn validate_currency(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.chars().all(|c| c.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency").with_message("must be a 3-letter ISO code".into()))
    }
}

pub fn validate_positive(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("must be greater than zero".into()))
    }
}

/// Percentages such as management fees: 0 to 100 inclusive.
pub fn validate_percentage(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO && *value <= Decimal::ONE_HUNDRED {
        Ok(())
    } else {
        Err(ValidationError::new("percentage").with_message("must be between 0 and 100".into()))
    }
}

pub fn validate_latitude(value: f64) -> Result<(), ValidationError> {
    if (-90.0..=90.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("latitude").with_message("must be between -90 and 90".into()))
    }
}

pub fn validate_longitude(value: f64) -> Result<(), ValidationError> {
    if (-180.0..=180.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("longitude").with_message("must be between -180 and 180".into()))
    }
}

/// Digits, spaces and the usual phone punctuation.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let well_formed = value.chars().any(|c| c.is_ascii_digit())
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')'));

    if well_formed {
        Ok(())
    } else {
        Err(ValidationError::new("phone").with_message("must be a phone number".into()))
    }
}

/// Rejects values that are only whitespace; `length(min = 1)` alone accepts `"   "`.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("must not be blank".into()))
    } else {
        Ok(())
    }
}

/// Flattens `ValidationErrors` into `field: message` lines for the error body.
pub fn describe(errors: &ValidationErrors) -> Vec<String> {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    details.sort();
    details
}

/// ValidatedJson
///
/// Drop-in replacement for `Json<T>` that also runs `T::validate()`. Malformed bodies
/// (including unknown enum variants) become `400`, constraint violations `422`.
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
