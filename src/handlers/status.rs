use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::error::AppError;
use crate::AppState;

pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "healthcare-portal",
        "version": env!("CARGO_PKG_VERSION"),
        "api_base_url": state.api.base_url(),
    }))
}

/// Any path the portal does not know.
pub async fn not_found() -> AppError {
    AppError::NotFound("404 - Not Found".into())
}
