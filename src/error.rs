use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::FetchError;
use crate::auth::session::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid username or password, {attempts_left} attempts left")]
    InvalidCredentials { attempts_left: u32 },

    #[error("You have exceeded the maximum number of attempts, please wait {retry_after_secs} seconds.")]
    LockedOut { retry_after_secs: u64 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] FetchError),

    #[error("Session storage error: {0}")]
    Session(#[from] SessionError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut details = None;
        let (status, message) = match &self {
            AppError::Unauthorized => {
                details = Some(json!({ "redirect": "/login" }));
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::InvalidCredentials { attempts_left } => {
                details = Some(json!({ "attempts_left": attempts_left }));
                (StatusCode::UNAUTHORIZED, self.to_string())
            }
            AppError::LockedOut { retry_after_secs } => {
                details = Some(json!({ "retry_after_secs": retry_after_secs }));
                (StatusCode::TOO_MANY_REQUESTS, self.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!(error = %e, "Health API request failed");
                (StatusCode::BAD_GATEWAY, "Health API request failed".into())
            }
            AppError::Session(e) => {
                tracing::error!(error = %e, "Session storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".into(),
                )
            }
        };

        let mut error = json!({
            "message": message,
            "code": status.as_u16(),
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
