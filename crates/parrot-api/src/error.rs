use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use parrot_persist::PersistError;
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthError),
    
    #[error("User not found: {0}")]
    UserNotFound(i64),
    
    #[error("Thread not found: {0}")]
    ThreadNotFound(i64),
    
    #[error("No messages found in thread: {0}")]
    NoMessages(i64),
    
    #[error("Bad request: {0}")]
    BadRequest(String),
    
    #[error("Invalid request: {0}")]
    Validation(String),
    
    #[error("Persistence error: {0}")]
    Persist(PersistError),
}

impl From<PersistError> for ApiError {
    fn from(err: PersistError) -> Self {
        match err {
            PersistError::UserNotFound(id) => ApiError::UserNotFound(id),
            PersistError::ThreadNotFound(id) => ApiError::ThreadNotFound(id),
            other => ApiError::Persist(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON that does not fit the request type
            JsonRejection::JsonDataError(e) => ApiError::Validation(e.body_text()),
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::UserNotFound(_) | ApiError::ThreadNotFound(_) | ApiError::NoMessages(_) => {
                StatusCode::NOT_FOUND
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                "Storage error".to_string()
            }
            ApiError::Unauthorized(ref e) => {
                tracing::debug!("Rejected request: {}", e);
                self.to_string()
            }
            _ => self.to_string(),
        };
        
        let body = Json(json!({
            "error": message
        }));
        
        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Basic")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
