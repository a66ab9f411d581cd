use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use parrot_persist::Thread;
use crate::{auth::AuthUser, error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ThreadResponse {
    pub id: i64,
    pub title: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Thread> for ThreadResponse {
    fn from(thread: Thread) -> Self {
        Self {
            id: thread.id,
            title: thread.title,
            created_at: thread.created_at,
        }
    }
}

/// List threads of the calling user
#[utoipa::path(
    get,
    path = "/threads",
    responses(
        (status = 200, description = "Threads in creation order", body = [ThreadResponse]),
        (status = 401, description = "Missing or malformed Authorization header")
    ),
    tag = "threads"
)]
pub async fn list_threads(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<ThreadResponse>>> {
    let threads = state.chat.list_threads(user_id).await?;
    Ok(Json(threads.into_iter().map(ThreadResponse::from).collect()))
}

/// Delete a thread and all of its messages
#[utoipa::path(
    delete,
    path = "/threads/{thread_id}",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 204, description = "Thread deleted"),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 404, description = "Thread not found")
    ),
    tag = "threads"
)]
pub async fn delete_thread(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.chat.delete_thread(thread_id, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
