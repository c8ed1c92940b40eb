use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use validator::Validate;

use super::DayQuery;
use crate::auth::middleware::AuthUser;
use crate::dashboard::{self, Rendered};
use crate::error::{AppError, AppResult};
use crate::models::mood::{MoodEntry, MoodPayload, MoodRequest};
use crate::models::RecordId;
use crate::views::grouping::DayTotal;
use crate::views::mood::{self as mood_view, StressGauge};
use crate::views::selection::DaySelection;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MoodRow {
    #[serde(flatten)]
    pub entry: MoodEntry,
    pub stress: StressGauge,
}

#[derive(Debug, Serialize)]
pub struct MoodView {
    /// Most recent first.
    pub entries: Vec<MoodRow>,
    pub tally: BTreeMap<String, usize>,
    pub stress_trend: Vec<DayTotal>,
    pub selected_day: Option<NaiveDate>,
    pub selected_entries: Vec<MoodEntry>,
}

pub fn build_view(entries: &[MoodEntry], selection: DaySelection) -> MoodView {
    let stress_trend = mood_view::stress_trend(entries);
    let days: Vec<NaiveDate> = stress_trend.iter().map(|t| t.date).collect();
    let selected_day = selection.resolve(&days);

    MoodView {
        entries: mood_view::newest_first(entries)
            .into_iter()
            .map(|entry| MoodRow {
                stress: mood_view::stress_gauge(entry.stress_level),
                entry,
            })
            .collect(),
        tally: mood_view::tally(entries),
        stress_trend,
        selected_day,
        selected_entries: selected_day
            .map(|day| mood_view::entries_on(entries, day))
            .unwrap_or_default(),
    }
}

fn render(entries: &[MoodEntry]) -> Rendered<MoodView> {
    Rendered::from_records(entries, |e| build_view(e, DaySelection::default()))
}

/// GET /mood
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
) -> Json<Rendered<MoodView>> {
    let selection = DaySelection::new(query.day);

    let rendered = dashboard::mount(
        &state.screens.moods,
        "mood entries",
        state.api.list_moods(&auth_user.token, &auth_user.id),
        |entries: &[MoodEntry]| build_view(entries, selection),
    )
    .await;

    Json(rendered)
}

/// POST /mood
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<MoodRequest>,
) -> AppResult<Json<Rendered<MoodView>>> {
    body.validate()?;
    let recorded_at = body
        .recorded_at
        .unwrap_or_else(|| Local::now().naive_local());

    let payload = MoodPayload {
        user_id: &auth_user.id,
        mood: &body.mood,
        stress_level: body.stress_level,
        recorded_at,
    };

    let entries = dashboard::save(
        &state.screens.moods,
        "mood entries",
        state.api.create_mood(&auth_user.token, &payload),
        |entries: &mut Vec<MoodEntry>| {
            entries.push(MoodEntry {
                mood_id: None,
                mood: body.mood.clone(),
                stress_level: body.stress_level,
                recorded_at,
            })
        },
        state.api.list_moods(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, mood = %body.mood, "Mood entry created");
    Ok(Json(render(&entries)))
}

/// PUT /mood/{moodId}
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
    Json(body): Json<MoodRequest>,
) -> AppResult<Json<Rendered<MoodView>>> {
    body.validate()?;
    let mood_id = RecordId::new(id);
    let same_entry = |e: &MoodEntry| e.mood_id.as_ref() == Some(&mood_id);

    let current = dashboard::find_or_reload(
        &state.screens.moods,
        "mood entries",
        same_entry,
        state.api.list_moods(&auth_user.token, &auth_user.id),
    )
    .await
    .ok_or_else(|| AppError::NotFound(format!("No mood entry {mood_id}")))?;

    let recorded_at = body.recorded_at.unwrap_or(current.recorded_at);
    let payload = MoodPayload {
        user_id: &auth_user.id,
        mood: &body.mood,
        stress_level: body.stress_level,
        recorded_at,
    };

    let entries = dashboard::save(
        &state.screens.moods,
        "mood entries",
        state.api.update_mood(&auth_user.token, &mood_id, &payload),
        |entries: &mut Vec<MoodEntry>| {
            for e in entries.iter_mut().filter(|e| same_entry(&**e)) {
                e.mood = body.mood.clone();
                e.stress_level = body.stress_level;
                e.recorded_at = recorded_at;
            }
        },
        state.api.list_moods(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, mood_id = %mood_id, "Mood entry updated");
    Ok(Json(render(&entries)))
}

/// DELETE /mood/{moodId}
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> AppResult<Json<Rendered<MoodView>>> {
    let mood_id = RecordId::new(id);

    let entries = dashboard::save(
        &state.screens.moods,
        "mood entries",
        state.api.delete_mood(&auth_user.token, &mood_id),
        |entries: &mut Vec<MoodEntry>| entries.retain(|e| e.mood_id.as_ref() != Some(&mood_id)),
        state.api.list_moods(&auth_user.token, &auth_user.id),
    )
    .await?;

    tracing::info!(user_id = %auth_user.id, mood_id = %mood_id, "Mood entry deleted");
    Ok(Json(render(&entries)))
}

/// POST /mood/edit/{moodId}
pub async fn begin_edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MoodEntry>> {
    let draft = state.screens.moods.lock().await.begin_edit(&id)?;
    Ok(Json(draft))
}

/// DELETE /mood/edit
pub async fn cancel_edit(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.screens.moods.lock().await.cancel_edit();
    Json(serde_json::json!({ "editing": false }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn entry(id: i64, mood: &str, stress: u8, at: &str) -> MoodEntry {
        MoodEntry {
            mood_id: Some(RecordId::from(id)),
            mood: mood.into(),
            stress_level: stress,
            recorded_at: parse_timestamp(at).unwrap(),
        }
    }

    #[test]
    fn test_view_orders_and_selects() {
        let entries = vec![
            entry(1, "Tired", 4, "2025-09-20T08:00:00"),
            entry(2, "Happy", 1, "2025-09-22T09:00:00"),
            entry(3, "Relaxed", 2, "2025-09-22T20:00:00"),
        ];

        let view = build_view(&entries, DaySelection::default());
        assert_eq!(view.entries[0].entry.mood, "Relaxed");
        assert_eq!(view.entries[0].stress.label, "Stress: 2/5");
        assert_eq!(view.selected_day, NaiveDate::from_ymd_opt(2025, 9, 22));
        assert_eq!(view.selected_entries.len(), 2);
        assert_eq!(view.tally["Tired"], 1);
        assert_eq!(view.tally["Stressed"], 0);
    }
}
