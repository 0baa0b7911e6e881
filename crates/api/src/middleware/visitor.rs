use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderName;

/// Header carrying the anonymous visitor token.
pub const VISITOR_TOKEN_HEADER: HeaderName = HeaderName::from_static("x-visitor-token");

/// Visitor token from the `X-Visitor-Token` header, if present.
///
/// Validation happens in the vote ledger so header and body tokens are
/// checked the same way.
#[derive(Debug, Clone, Default)]
pub struct VisitorToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for VisitorToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(VISITOR_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(VisitorToken(token))
    }
}
