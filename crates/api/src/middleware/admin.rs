//! Shared-secret gate for admin-only endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use fansite_core::error::CoreError;
use sha2::{Digest, Sha256};

use crate::error::AppError;
use crate::state::AppState;

/// Passes when the request carries `Authorization: Bearer <ADMIN_PASSWORD>`.
///
/// With no admin password configured every request passes, which keeps
/// local development friction-free.
///
/// ```ignore
/// async fn delete(_admin: RequireAdmin, Path(id): Path<String>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin_password.as_deref() else {
            return Ok(RequireAdmin);
        };

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        // Compare fixed-length digests, never the raw secret.
        if Sha256::digest(token.as_bytes()) != Sha256::digest(expected.as_bytes()) {
            tracing::warn!(path = %parts.uri.path(), "Rejected admin request with wrong credentials");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid admin credentials".into(),
            )));
        }

        Ok(RequireAdmin)
    }
}
