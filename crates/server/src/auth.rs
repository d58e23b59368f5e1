//! Optional shared-secret check on mutating endpoints.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::config::Config;
use crate::error::AppError;

/// Extractor that enforces the `x-api-key` header when
/// `REQUIRE_API_KEY` is set. With enforcement off (the default) every
/// request passes, matching the original deployment.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyGuard;

impl<S> FromRequestParts<S> for ApiKeyGuard
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Config>()
            .ok_or(AppError::Internal("Missing config".into()))?;

        if !config.require_api_key {
            return Ok(ApiKeyGuard);
        }

        let provided = parts
            .headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if provided != config.api_secret {
            tracing::warn!("Rejected request with invalid API key");
            return Err(AppError::Unauthorized);
        }

        Ok(ApiKeyGuard)
    }
}
