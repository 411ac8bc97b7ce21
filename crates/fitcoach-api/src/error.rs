use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use fitcoach_auth::AuthError;
use fitcoach_persist::PersistError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Auth(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Upstream error: {0}")]
    Upstream(anyhow::Error),

    #[error("Internal server error")]
    Internal,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InvalidCredentials => ApiError::Auth("Invalid credentials".to_string()),
            AuthError::TokenExpired | AuthError::MalformedToken | AuthError::Jwt(_) => {
                ApiError::Auth("Invalid or expired token".to_string())
            }
            AuthError::GoogleVerification(ref detail) => {
                tracing::warn!("Google auth error: {}", detail);
                ApiError::Auth("Google authentication failed".to_string())
            }
            AuthError::MissingEmailClaim => {
                ApiError::Auth("Google authentication failed".to_string())
            }
            AuthError::Hash(ref e) => {
                tracing::error!("Password hashing error: {}", e);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Auth(_) => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, self.to_string()),
            // Duplicate email can surface from the unique constraint when
            // two signups race past the existence check.
            ApiError::Persist(PersistError::DuplicateEmail(_)) => (
                StatusCode::CONFLICT,
                "Email already registered".to_string(),
            ),
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
            ApiError::Upstream(ref e) => {
                tracing::error!("Coach upstream error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Coach service unavailable".to_string(),
                )
            }
            ApiError::Internal => {
                tracing::error!("Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let response = ApiError::Validation("Email and password required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn duplicate_email_maps_to_409() {
        let response =
            ApiError::Persist(PersistError::DuplicateEmail("a@b.com".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn storage_errors_are_generic_500s() {
        let response = ApiError::Persist(PersistError::Connection("pool gone".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
