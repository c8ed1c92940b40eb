use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::parse_day;
use crate::auth::middleware::AuthUser;
use crate::dashboard::{self, Rendered};
use crate::error::{AppError, AppResult};
use crate::models::sleep::{
    CreateSleepRequest, SleepPayload, SleepRecord, SleepTimesPayload, UpdateSleepRequest,
};
use crate::models::RecordId;
use crate::views::sleep::{self as sleep_view, SleepView};
use crate::AppState;

fn render(records: &[SleepRecord]) -> Rendered<SleepView> {
    Rendered::from_records(records, sleep_view::build)
}

/// GET /sleep
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<Rendered<SleepView>> {
    let rendered = dashboard::mount(
        &state.screens.sleep,
        "sleep records",
        state.api.list_sleep(&auth_user.token, &auth_user.id),
        sleep_view::build,
    )
    .await;

    Json(rendered)
}

/// POST /sleep
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateSleepRequest>,
) -> AppResult<Json<Rendered<SleepView>>> {
    let payload = SleepPayload {
        user_id: &auth_user.id,
        sleep_time: body.sleep_time,
        wake_time: body.wake_time,
        recorded_at: body.recorded_at,
    };

    let records = dashboard::save(
        &state.screens.sleep,
        "sleep records",
        state.api.create_sleep(&auth_user.token, &payload),
        |records: &mut Vec<SleepRecord>| {
            records.push(SleepRecord {
                sleep_id: None,
                recorded_at: body.recorded_at,
                sleep_time: body.sleep_time,
                wake_time: body.wake_time,
            })
        },
        state.api.list_sleep(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, date = %body.recorded_at, "Sleep record created");
    Ok(Json(render(&records)))
}

/// PUT /sleep/{date}
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(key): Path<String>,
    Json(body): Json<UpdateSleepRequest>,
) -> AppResult<Json<Rendered<SleepView>>> {
    let date = parse_day(&key)?;

    dashboard::find_or_reload(
        &state.screens.sleep,
        "sleep records",
        |r: &SleepRecord| r.recorded_at == date,
        state.api.list_sleep(&auth_user.token, &auth_user.id),
    )
    .await
    .ok_or_else(|| AppError::NotFound(format!("No sleep record on {date}")))?;

    let times = SleepTimesPayload {
        sleep_time: body.sleep_time,
        wake_time: body.wake_time,
    };

    let records = dashboard::save(
        &state.screens.sleep,
        "sleep records",
        state
            .api
            .update_sleep(&auth_user.token, &auth_user.id, date, &times),
        |records: &mut Vec<SleepRecord>| {
            for r in records.iter_mut().filter(|r| r.recorded_at == date) {
                r.sleep_time = body.sleep_time;
                r.wake_time = body.wake_time;
            }
        },
        state.api.list_sleep(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, date = %date, "Sleep record updated");
    Ok(Json(render(&records)))
}

/// DELETE /sleep/{sleepId}
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(key): Path<String>,
) -> AppResult<Json<Rendered<SleepView>>> {
    let sleep_id = RecordId::new(key);

    let records = dashboard::save(
        &state.screens.sleep,
        "sleep records",
        state.api.delete_sleep(&auth_user.token, &sleep_id),
        |records: &mut Vec<SleepRecord>| {
            records.retain(|r| r.sleep_id.as_ref() != Some(&sleep_id))
        },
        state.api.list_sleep(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, sleep_id = %sleep_id, "Sleep record deleted");
    Ok(Json(render(&records)))
}

/// POST /sleep/edit/{date}
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> AppResult<Json<SleepRecord>> {
    let key = parse_day(&date)?.format("%Y-%m-%d").to_string();
    let draft = state.screens.sleep.lock().await.begin_edit(&key)?;
    Ok(Json(draft))
}

/// DELETE /sleep/edit
pub async fn cancel_edit(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.screens.sleep.lock().await.cancel_edit();
    Json(serde_json::json!({ "editing": false }))
}
