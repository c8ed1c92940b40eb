use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::{user::Role, RecordId};
use crate::AppState;

/// Identity of the signed-in user, attached to private requests.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: RecordId,
    pub token: String,
    pub role: Role,
}

/// Private-route guard: no stored token, no dashboard.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let identity = state
        .session
        .identity()
        .await
        .filter(|identity| !identity.token.is_empty())
        .ok_or(AppError::Unauthorized)?;

    let auth_user = AuthUser {
        id: identity.user_id,
        token: identity.token,
        role: identity.role,
    };

    tracing::debug!(user_id = %auth_user.id, path = %req.uri().path(), "Session check passed");
    req.extensions_mut().insert(auth_user);
    Ok(next.run(req).await)
}
