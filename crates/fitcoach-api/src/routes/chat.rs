use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use fitcoach_types::ChatThread;

use crate::{
    error::{ApiError, ApiResult},
    extract::AuthClaims,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub user_id: String,
}

/// Upsert a chat thread
///
/// Saving an id that already exists overwrites title, messages and
/// updatedAt only. The caller must own the thread.
#[utoipa::path(
    post,
    path = "/api/chat/save",
    responses(
        (status = 200, description = "Thread saved"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 403, description = "Thread belongs to another user"),
        (status = 500, description = "Storage error")
    ),
    tag = "chat"
)]
pub async fn save_chat(
    AuthClaims(claims): AuthClaims,
    State(state): State<Arc<AppState>>,
    Json(thread): Json<ChatThread>,
) -> ApiResult<Json<serde_json::Value>> {
    if thread.user_id != claims.id {
        return Err(ApiError::Forbidden(
            "Thread does not belong to the authenticated user".to_string(),
        ));
    }

    // Client-generated ids can collide across users; an id already owned by
    // someone else is rejected rather than silently overwritten.
    if let Some(owner) = state.persist.thread_owner(&thread.id).await? {
        if owner != claims.id {
            return Err(ApiError::Forbidden(
                "Thread id is owned by another user".to_string(),
            ));
        }
    }

    state.persist.save_thread(&thread).await?;
    Ok(Json(json!({ "success": true })))
}

/// List the caller's chat threads, most recently updated first
#[utoipa::path(
    get,
    path = "/api/chat/history",
    params(("user_id" = String, Query, description = "Owner of the threads; must match the session")),
    responses(
        (status = 200, description = "Thread list"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 403, description = "Requested another user's history"),
        (status = 500, description = "Storage error")
    ),
    tag = "chat"
)]
pub async fn chat_history(
    AuthClaims(claims): AuthClaims,
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<serde_json::Value>> {
    if query.user_id != claims.id {
        return Err(ApiError::Forbidden(
            "History is only available for the authenticated user".to_string(),
        ));
    }

    let threads = state.persist.threads_for_user(&claims.id).await?;
    Ok(Json(json!({ "success": true, "threads": threads })))
}

/// Delete a chat thread
///
/// Idempotent: deleting an id that does not exist succeeds.
#[utoipa::path(
    delete,
    path = "/api/chat/{thread_id}",
    params(("thread_id" = String, Path, description = "Thread id")),
    responses(
        (status = 200, description = "Thread deleted (or was already absent)"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 403, description = "Thread belongs to another user"),
        (status = 500, description = "Storage error")
    ),
    tag = "chat"
)]
pub async fn delete_chat(
    AuthClaims(claims): AuthClaims,
    State(state): State<Arc<AppState>>,
    Path(thread_id): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    match state.persist.thread_owner(&thread_id).await? {
        None => {
            // Absent id: nothing to do, still a success.
            return Ok(Json(json!({ "success": true })));
        }
        Some(owner) if owner != claims.id => {
            return Err(ApiError::Forbidden(
                "Thread does not belong to the authenticated user".to_string(),
            ));
        }
        Some(_) => {}
    }

    state.persist.delete_thread(&thread_id).await?;
    Ok(Json(json!({ "success": true })))
}
