use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::NaiveDate;
use serde::Serialize;

use super::DayQuery;
use crate::auth::middleware::AuthUser;
use crate::dashboard::{self, Rendered};
use crate::models::meal::DailyMeal;
use crate::views::grouping::{self, DayBreakdown, DayTotal};
use crate::views::selection::DaySelection;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MealsView {
    pub meals: Vec<DailyMeal>,
    /// Most recent day first.
    pub daily_totals: Vec<DayTotal>,
    /// Oldest day first.
    pub trend: Vec<DayTotal>,
    pub selected_day: Option<NaiveDate>,
    pub breakdown: Option<DayBreakdown>,
    pub total_calories: f64,
}

pub fn build_view(meals: &[DailyMeal], selection: DaySelection) -> MealsView {
    let trend = grouping::meal_daily_totals(meals);
    let days: Vec<NaiveDate> = trend.iter().map(|t| t.date).collect();
    let selected_day = selection.resolve(&days);

    MealsView {
        meals: meals.to_vec(),
        daily_totals: grouping::newest_first(trend.clone()),
        trend,
        selected_day,
        breakdown: selected_day.map(|day| grouping::meal_breakdown(meals, day)),
        total_calories: meals.iter().map(|m| m.calories).sum(),
    }
}

/// GET /dailymeals
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DayQuery>,
) -> Json<Rendered<MealsView>> {
    let selection = DaySelection::new(query.day);

    let rendered = dashboard::mount(
        &state.screens.meals,
        "daily meals",
        state.api.list_daily_meals(&auth_user.token, &auth_user.id),
        |meals: &[DailyMeal]| build_view(meals, selection),
    )
    .await;

    Json(rendered)
}
