use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::FetchError;
use crate::auth::guard::{retry_secs, Admission, GuardStatus};
use crate::auth::session::Identity;
use crate::error::{AppError, AppResult};
use crate::models::user::{AuthResponse, Role};
use crate::models::RecordId;
use crate::AppState;

/// Where a successful login lands.
pub const LANDING_ROUTE: &str = "/health";

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub role: Role,
    pub id: RecordId,
    pub redirect: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginScreen {
    pub authenticated: bool,
    #[serde(flatten)]
    pub guard: GuardStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    pub is_admin: bool,
    pub is_user: bool,
    pub admin_only: bool,
    pub user_only: bool,
}

/// Identity from a /auth/token response, if it carried a token.
fn identity_from(response: AuthResponse) -> Option<Identity> {
    let result = response.result?;
    let token = result.token.filter(|t| !t.is_empty())?;

    Some(Identity {
        token,
        role: result.role.unwrap_or(Role::Unknown),
        user_id: result.id.unwrap_or_else(|| RecordId::new("")),
        authenticated: result.authenticated,
    })
}

/// GET / and GET /login
pub async fn login_screen(State(state): State<AppState>) -> AppResult<Json<LoginScreen>> {
    let now = Utc::now();
    let policy = state.policy;

    // An elapsed lockout is cleared as soon as someone looks at it.
    let snapshot = state
        .session
        .update(|session| {
            policy.expire(&mut session.guard, now);
            session.clone()
        })
        .await?;

    let guard = policy.status(&snapshot.guard, now);
    let message = guard.locked_out.then(|| {
        AppError::LockedOut {
            retry_after_secs: guard.retry_after_secs,
        }
        .to_string()
    });

    Ok(Json(LoginScreen {
        authenticated: snapshot.identity.is_some(),
        guard,
        message,
    }))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    if state.session.is_authenticated().await {
        return Err(AppError::Conflict(
            "Please logout before logging in again".into(),
        ));
    }

    let now = Utc::now();
    let policy = state.policy;

    let admission = state
        .session
        .update(|session| policy.admit(&mut session.guard, now))
        .await?;

    let attempts_left = match admission {
        Admission::Proceed { attempts_left } => attempts_left,
        Admission::LockedOut { retry_after } => {
            let retry_after_secs = retry_secs(retry_after);
            tracing::warn!(
                username = %body.username,
                retry_after_secs = retry_after_secs,
                "Login refused during lockout"
            );
            return Err(AppError::LockedOut { retry_after_secs });
        }
    };

    let identity = match state.api.login(&body.username, &body.password).await {
        Ok(response) => identity_from(response),
        Err(e) if e.is_auth_rejection() => None,
        Err(FetchError::Decode(e)) => {
            tracing::warn!(error = %e, "Login response could not be decoded");
            None
        }
        Err(e) => {
            // No verdict on the credentials, so the attempt does not count.
            state
                .session
                .update(|session| policy.refund(&mut session.guard))
                .await?;
            return Err(AppError::Upstream(e));
        }
    };

    let Some(identity) = identity else {
        tracing::info!(
            username = %body.username,
            attempts_left = attempts_left,
            "Login rejected"
        );
        return Err(AppError::InvalidCredentials { attempts_left });
    };

    let response = LoginResponse {
        message: "Login successfully",
        role: identity.role.clone(),
        id: identity.user_id.clone(),
        redirect: LANDING_ROUTE,
    };

    state
        .session
        .update(|session| {
            session.identity = Some(identity);
            policy.record_success(&mut session.guard);
        })
        .await?;

    tracing::info!(user_id = %response.id, "Login succeeded");
    Ok(Json(response))
}

/// POST /logout
pub async fn logout(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    state.session.logout(state.fresh_session()).await?;
    tracing::info!("Session cleared");
    Ok(Json(serde_json::json!({
        "message": "You have been logged out.",
        "redirect": "/login",
    })))
}

/// GET /session
pub async fn session(State(state): State<AppState>) -> Json<SessionInfo> {
    let session = &state.session;
    let authenticated = session.is_authenticated().await;
    let is_admin = session.has_role(&Role::Admin).await;
    let is_user = session.has_role(&Role::User).await;
    let identity = session.identity().await;

    Json(SessionInfo {
        authenticated,
        id: identity.as_ref().map(|i| i.user_id.clone()),
        role: identity.map(|i| i.role),
        is_admin,
        is_user,
        admin_only: authenticated && is_admin,
        user_only: authenticated && is_user,
    })
}
