use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    extract::AuthClaims,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CoachRequest {
    pub prompt: Option<String>,
}

/// Forward a prompt to the coaching model
///
/// Thin proxy: prompt string in, completion text out. Upstream failures map
/// to a generic 502.
#[utoipa::path(
    post,
    path = "/api/coach",
    responses(
        (status = 200, description = "Completion text"),
        (status = 400, description = "Prompt missing"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 502, description = "Coach service unavailable")
    ),
    tag = "coach"
)]
pub async fn coach_completion(
    AuthClaims(_claims): AuthClaims,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CoachRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    let prompt = req
        .prompt
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| ApiError::Validation("Prompt required".to_string()))?;

    let text = state
        .coach
        .complete(prompt)
        .await
        .map_err(ApiError::Upstream)?;

    Ok(Json(json!({ "success": true, "data": { "text": text } })))
}
