use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

use bot::BotError;
use storage::StorageError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    BadRequest(String),
    Forbidden,
    NotFound,
    Internal(String),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            Self::Forbidden => write!(f, "Forbidden"),
            Self::NotFound => write!(f, "Resource not found"),
            Self::Internal(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::BadRequest(msg) => json!({ "error": msg }),
            Self::Forbidden => json!({ "error": "Forbidden" }),
            Self::NotFound => json!({ "error": "Resource not found" }),
            Self::Internal(msg) => {
                tracing::error!("Internal server error: {}", msg);
                json!({ "error": "An internal error occurred" })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<BotError> for WebError {
    fn from(error: BotError) -> Self {
        match error {
            BotError::Payment(e) => Self::BadRequest(e.to_string()),
            BotError::RegistrationNotFound | BotError::StageNotFound => Self::NotFound,
            BotError::Storage(StorageError::InvalidInput(msg)) => Self::BadRequest(msg),
            other => Self::Internal(other.to_string()),
        }
    }
}

pub type WebResult<T> = Result<T, WebError>;
