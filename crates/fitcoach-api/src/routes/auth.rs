use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use fitcoach_auth::{hash_password, issue_token, verify_password};
use fitcoach_persist::PersistError;
use fitcoach_types::{Provider, PublicUser, User};

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub id_token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub token: String,
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub data: AuthData,
}

/// Register a new email/password account
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    responses(
        (status = 200, description = "Account created, session token issued"),
        (status = 400, description = "Email or password missing"),
        (status = 409, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (email, password) = require_credentials(&req)?;

    if state.persist.find_user_by_email(email).await?.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = hash_password(password).map_err(ApiError::from)?;
    let user = state
        .persist
        .create_user(email, Some(&password_hash), Provider::Local)
        .await?;

    tracing::info!(user_id = %user.id, "user signed up");
    Ok(Json(auth_response(&state, &user)?))
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    responses(
        (status = 200, description = "Session token issued"),
        (status = 400, description = "Email or password missing"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CredentialsRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (email, password) = require_credentials(&req)?;

    // A missing user, a passwordless (OAuth-only) account, and a hash
    // mismatch all produce the same response. No information leak.
    let user = state
        .persist
        .find_user_by_email(email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let stored_hash = user.password_hash.as_deref().ok_or_else(invalid_credentials)?;
    let valid = verify_password(password, stored_hash).map_err(ApiError::from)?;
    if !valid {
        return Err(invalid_credentials());
    }

    Ok(Json(auth_response(&state, &user)?))
}

/// Log out
///
/// Session tokens are stateless, so there is nothing to revoke server-side;
/// the client deletes its copy of the token.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses((status = 200, description = "Acknowledged")),
    tag = "auth"
)]
pub async fn logout() -> Json<serde_json::Value> {
    Json(json!({ "message": "Logged out" }))
}

/// Log in with a Google ID token, creating the account on first use
#[utoipa::path(
    post,
    path = "/api/auth/google",
    responses(
        (status = 200, description = "Session token issued"),
        (status = 400, description = "No ID token provided"),
        (status = 401, description = "Google verification failed")
    ),
    tag = "auth"
)]
pub async fn google_auth(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GoogleAuthRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let id_token = req
        .id_token
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Validation("No Google ID token provided".to_string()))?;

    let identity = state
        .google_verifier
        .verify(id_token)
        .await
        .map_err(ApiError::from)?;

    let user = match state.persist.find_user_by_email(&identity.email).await? {
        Some(user) => user,
        None => {
            // Google users don't have a password hash.
            match state
                .persist
                .create_user(&identity.email, None, Provider::Google)
                .await
            {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "google user created");
                    user
                }
                // Lost a race with a concurrent first login for this email.
                Err(PersistError::DuplicateEmail(_)) => state
                    .persist
                    .find_user_by_email(&identity.email)
                    .await?
                    .ok_or(ApiError::Internal)?,
                Err(e) => return Err(e.into()),
            }
        }
    };

    Ok(Json(auth_response(&state, &user)?))
}

fn require_credentials(req: &CredentialsRequest) -> ApiResult<(&str, &str)> {
    match (req.email.as_deref(), req.password.as_deref()) {
        (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::Validation(
            "Email and password required".to_string(),
        )),
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::Auth("Invalid credentials".to_string())
}

fn auth_response(state: &AppState, user: &User) -> ApiResult<AuthResponse> {
    let token = issue_token(
        &user.id.to_string(),
        &user.email,
        &state.config.jwt_secret,
    )
    .map_err(ApiError::from)?;

    Ok(AuthResponse {
        success: true,
        data: AuthData {
            token,
            user: user.public(),
        },
    })
}
