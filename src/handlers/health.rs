use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use validator::Validate;

use super::parse_day;
use crate::auth::middleware::AuthUser;
use crate::dashboard::{self, or_empty, Rendered};
use crate::error::{AppError, AppResult};
use crate::models::health::{
    HealthGoal, HealthMetric, UpdateGoalRequest, UpdateMetricRequest,
};
use crate::views::heart_rate::{self, HeartRateSummary};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthView {
    pub metrics: Vec<HealthMetric>,
    pub heart_rate: HeartRateSummary,
    pub heart_rate_readings: Vec<HealthMetric>,
    pub blood_pressure: Vec<HealthMetric>,
}

#[derive(Debug, Serialize)]
pub struct HealthDashboard {
    pub metrics: Rendered<HealthView>,
    pub goal: Option<HealthGoal>,
}

pub fn build_view(metrics: &[HealthMetric]) -> HealthView {
    HealthView {
        metrics: metrics.to_vec(),
        heart_rate: heart_rate::summarize(metrics),
        heart_rate_readings: metrics
            .iter()
            .filter(|m| m.heart_rate.is_some())
            .cloned()
            .collect(),
        blood_pressure: heart_rate::blood_pressure_series(metrics),
    }
}

/// The last goal in the list is the one in force.
async fn latest_goal(state: &AppState, auth_user: &AuthUser) -> Option<HealthGoal> {
    let goals = or_empty(
        state.api.list_health_goals(&auth_user.token, &auth_user.id).await,
        "health goals",
    );
    goals.into_iter().last()
}

/// GET /health
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<HealthDashboard> {
    let metrics = dashboard::mount(
        &state.screens.health,
        "health metrics",
        state.api.list_health_metrics(&auth_user.token, &auth_user.id),
        build_view,
    )
    .await;
    let goal = latest_goal(&state, &auth_user).await;

    Json(HealthDashboard { metrics, goal })
}

/// PUT /health/goals
///
/// The save slot is held across reading the current goal, so concurrent
/// edits never merge into the same stale goal.
pub async fn update_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<UpdateGoalRequest>,
) -> AppResult<Json<HealthGoal>> {
    body.validate()?;
    let goals = &state.screens.goals;
    let slot = dashboard::claim(goals).await?;

    let current = latest_goal(&state, &auth_user).await.unwrap_or_default();
    let updated = current.with_target(body.kind, body.value);

    let saved = dashboard::commit(
        goals,
        slot,
        "health goals",
        state
            .api
            .update_health_goal(&auth_user.token, &auth_user.id, &updated),
        |list: &mut Vec<HealthGoal>| match list.last_mut() {
            Some(last) => *last = updated.clone(),
            None => list.push(updated.clone()),
        },
        state.api.list_health_goals(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, kind = ?body.kind, value = body.value, "Health goal updated");
    Ok(Json(saved.last().cloned().unwrap_or(updated)))
}

/// PUT /health/metrics/{date}
pub async fn update_metric(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(date): Path<String>,
    Json(body): Json<UpdateMetricRequest>,
) -> AppResult<Json<Rendered<HealthView>>> {
    body.validate()?;
    let date = parse_day(&date)?;
    let field = body.field;

    let same_slot =
        move |m: &HealthMetric| m.recorded_at.date() == date && m.carries(field);

    let mut updated = dashboard::find_or_reload(
        &state.screens.health,
        "health metrics",
        same_slot,
        state.api.list_health_metrics(&auth_user.token, &auth_user.id),
    )
    .await
    .ok_or_else(|| AppError::NotFound(format!("No {field:?} reading on {date}")))?;
    updated.set(field, body.value);

    let records = dashboard::save(
        &state.screens.health,
        "health metrics",
        state
            .api
            .update_health_metric(&auth_user.token, &auth_user.id, date, &updated),
        |metrics: &mut Vec<HealthMetric>| {
            for m in metrics.iter_mut().filter(|m| same_slot(&**m)) {
                *m = updated.clone();
            }
        },
        state.api.list_health_metrics(&auth_user.token, &auth_user.id),
    )
    .await?;

    Ok(Json(Rendered::from_records(&records, build_view)))
}

/// POST /health/edit/{date}
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<HealthMetric>> {
    let key = parse_day(&date)?.format("%Y-%m-%d").to_string();
    let draft = state.screens.health.lock().await.begin_edit(&key)?;
    Ok(Json(draft))
}

/// DELETE /health/edit
pub async fn cancel_edit(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.screens.health.lock().await.cancel_edit();
    Json(serde_json::json!({ "editing": false }))
}
