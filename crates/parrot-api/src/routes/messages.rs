use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use parrot_persist::{DBMessage, Exchange};
use crate::{
    auth::AuthUser,
    error::ApiResult,
    extract::ApiJson,
    routes::threads::ThreadResponse,
    state::AppState,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub id: i64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub response_to_id: Option<i64>,
    pub user_id: i64,
}

impl From<DBMessage> for MessageResponse {
    fn from(message: DBMessage) -> Self {
        Self {
            id: message.id,
            message: message.message,
            timestamp: message.timestamp,
            response_to_id: message.response_to_id,
            user_id: message.user_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub message: String,
    /// Omit or send `null` to start a new thread
    #[serde(default)]
    pub thread_id: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserMessageResponse {
    pub id: i64,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatbotMessageResponse {
    pub id: i64,
    pub message: String,
    pub response_to_id: Option<i64>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponse {
    pub thread: ThreadResponse,
    pub user_message: UserMessageResponse,
    pub chatbot_response: ChatbotMessageResponse,
}

impl From<Exchange> for SendMessageResponse {
    fn from(exchange: Exchange) -> Self {
        let Exchange { thread, user_message, reply } = exchange;
        Self {
            thread: thread.into(),
            user_message: UserMessageResponse {
                id: user_message.id,
                message: user_message.message,
                timestamp: user_message.timestamp,
            },
            chatbot_response: ChatbotMessageResponse {
                id: reply.id,
                message: reply.message,
                response_to_id: reply.response_to_id,
                timestamp: reply.timestamp,
            },
        }
    }
}

/// List messages in a thread
#[utoipa::path(
    get,
    path = "/threads/{thread_id}/messages",
    params(
        ("thread_id" = i64, Path, description = "Thread ID")
    ),
    responses(
        (status = 200, description = "Messages in insertion order", body = [MessageResponse]),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 404, description = "Thread not found or empty")
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(thread_id): Path<i64>,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let messages = state.chat.thread_messages(thread_id, user_id).await?;
    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

/// Send a message and receive the chatbot's reply
#[utoipa::path(
    post,
    path = "/send_message",
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Persisted exchange", body = SendMessageResponse),
        (status = 400, description = "Body is not valid JSON"),
        (status = 401, description = "Missing or malformed Authorization header"),
        (status = 404, description = "Thread or user not found"),
        (status = 422, description = "Body is missing required fields")
    ),
    tag = "messages"
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    ApiJson(req): ApiJson<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    let exchange = state
        .chat
        .send_message(user_id, &req.message, req.thread_id)
        .await?;
    Ok(Json(exchange.into()))
}
