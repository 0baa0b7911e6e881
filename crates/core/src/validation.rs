//! Field validation rules shared by the record models and HTTP handlers.
//!
//! The `validate_*` functions returning [`ValidationError`] plug into
//! `#[validate(custom(function = ...))]` on the model structs; the rest
//! return [`CoreError`] directly for use in handlers.

use std::borrow::Cow;

use validator::ValidationError;

use crate::error::CoreError;

/// Longest accepted visitor token (characters).
pub const MAX_VISITOR_TOKEN_LEN: usize = 128;

/// Prefix accepted for inline images in place of a CDN URL.
pub const DATA_URI_PREFIX: &str = "data:";

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// `true` when `value` parses as an absolute `http`/`https` URL with a host.
pub fn is_web_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

pub fn validate_web_url(value: &str) -> Result<(), ValidationError> {
    if is_web_url(value) {
        Ok(())
    } else {
        Err(error("url", "Invalid URL format"))
    }
}

/// Like [`validate_web_url`] but treats the empty string as "unset".
pub fn validate_web_url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    validate_web_url(value)
}

/// Fan-art images are either CDN URLs or inline `data:` URIs.
pub fn validate_image_source(value: &str) -> Result<(), ValidationError> {
    if value.starts_with(DATA_URI_PREFIX) || is_web_url(value) {
        Ok(())
    } else {
        Err(error("image", "Invalid image URL format"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

/// Validate a visitor token used for server-side vote tracking.
pub fn validate_visitor_token(token: &str) -> Result<(), CoreError> {
    if token.is_empty() || token.chars().count() > MAX_VISITOR_TOKEN_LEN {
        return Err(CoreError::Validation(format!(
            "Visitor token must be between 1 and {MAX_VISITOR_TOKEN_LEN} characters"
        )));
    }
    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(CoreError::Validation(
            "Visitor token must not contain whitespace or control characters".into(),
        ));
    }
    Ok(())
}

/// Trim an optional text field, collapsing blank values to `None`.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
