use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dashboard::{self, or_empty, Rendered};
use crate::error::{AppError, AppResult};
use crate::models::reminder::{
    CreateReminderRequest, Reminder, ReminderPayload, ReminderStatus, ReminderStatusRequest,
    ReminderType, StatusPayload,
};
use crate::models::RecordId;
use crate::views::reminder::{self as reminder_view, ReminderProgress};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ReminderView {
    pub reminders: Vec<Reminder>,
    pub progress: ReminderProgress,
}

#[derive(Debug, Serialize)]
pub struct ReminderDashboard {
    pub reminders: Rendered<ReminderView>,
    pub types: Vec<ReminderType>,
}

pub fn build_view(reminders: &[Reminder]) -> ReminderView {
    ReminderView {
        reminders: reminders.to_vec(),
        progress: reminder_view::progress(reminders),
    }
}

/// GET /reminder
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Json<ReminderDashboard> {
    let reminders = dashboard::mount(
        &state.screens.reminders,
        "reminders",
        state.api.list_reminders(&auth_user.token, &auth_user.id),
        build_view,
    )
    .await;
    let types = or_empty(
        state.api.list_reminder_types(&auth_user.token).await,
        "reminder types",
    );

    Json(ReminderDashboard { reminders, types })
}

/// POST /reminder
///
/// New reminders start out pending. The id is assigned by the backend, so the
/// new row only appears once the list is fetched again.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateReminderRequest>,
) -> AppResult<Json<Rendered<ReminderView>>> {
    body.validate()?;

    let payload = ReminderPayload {
        user_id: &auth_user.id,
        type_id: &body.type_id,
        status: ReminderStatus::Pending,
    };

    let reminders = dashboard::save(
        &state.screens.reminders,
        "reminders",
        state.api.create_reminder(&auth_user.token, &payload),
        |_: &mut Vec<Reminder>| {},
        state.api.list_reminders(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, type_id = %body.type_id, "Reminder created");
    Ok(Json(Rendered::from_records(&reminders, build_view)))
}

/// PUT /reminder/{reminderId}/status
pub async fn set_status(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<ReminderStatusRequest>,
) -> AppResult<Json<Rendered<ReminderView>>> {
    let reminder_id = RecordId::new(id);
    let same_reminder = |r: &Reminder| r.reminder_id == reminder_id;

    let current = dashboard::find_or_reload(
        &state.screens.reminders,
        "reminders",
        same_reminder,
        state.api.list_reminders(&auth_user.token, &auth_user.id),
    )
    .await
    .ok_or_else(|| AppError::NotFound(format!("No reminder {reminder_id}")))?;

    let status = body.status.unwrap_or_else(|| current.status.toggled());

    let reminders = dashboard::save(
        &state.screens.reminders,
        "reminders",
        state.api.update_reminder_status(
            &auth_user.token,
            &auth_user.id,
            &reminder_id,
            &StatusPayload { status },
        ),
        |reminders: &mut Vec<Reminder>| {
            for r in reminders.iter_mut().filter(|r| same_reminder(&**r)) {
                r.status = status;
            }
        },
        state.api.list_reminders(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(
        user_id = %auth_user.id,
        reminder_id = %reminder_id,
        status = ?status,
        "Reminder status updated"
    );
    Ok(Json(Rendered::from_records(&reminders, build_view)))
}
