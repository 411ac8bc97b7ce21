use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use fitcoach_auth::{verify_token, Claims};

use crate::{error::ApiError, state::AppState};

/// Extractor for the authenticated caller's session claims.
///
/// Reads the `Authorization: Bearer <token>` header and fully verifies the
/// token (signature and expiry) against the configured secret.
pub struct AuthClaims(pub Claims);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthClaims {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("Invalid authorization header".to_string()))?;

        let claims = verify_token(token, &state.config.jwt_secret).map_err(ApiError::from)?;
        Ok(AuthClaims(claims))
    }
}
