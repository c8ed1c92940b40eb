pub mod auth;
pub mod health;
pub mod meals;
pub mod moods;
pub mod reminders;
pub mod sleep;
pub mod status;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::parse_timestamp;

/// `?day=yyyy-MM-dd` on the day-grouped dashboards.
#[derive(Debug, Default, Deserialize)]
pub struct DayQuery {
    pub day: Option<NaiveDate>,
}

/// A calendar day from a path segment.
pub fn parse_day(raw: &str) -> AppResult<NaiveDate> {
    parse_timestamp(raw)
        .map(|dt| dt.date())
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {raw}")))
}
