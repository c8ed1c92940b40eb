use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{calendar_date, time_of_day, Keyed, RecordId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepRecord {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub sleep_id: Option<RecordId>,
    #[serde(with = "calendar_date")]
    pub recorded_at: NaiveDate,
    #[serde(with = "time_of_day")]
    pub sleep_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub wake_time: NaiveTime,
}

impl Keyed for SleepRecord {
    fn key(&self) -> String {
        self.recorded_at.format("%Y-%m-%d").to_string()
    }
}

/// POST /sleep
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSleepRequest {
    #[serde(with = "calendar_date")]
    pub recorded_at: NaiveDate,
    #[serde(with = "time_of_day")]
    pub sleep_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub wake_time: NaiveTime,
}

/// PUT /sleep/{date}
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSleepRequest {
    #[serde(with = "time_of_day")]
    pub sleep_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub wake_time: NaiveTime,
}

/// Body for POST /api/sleeptrackings-create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepPayload<'a> {
    pub user_id: &'a RecordId,
    #[serde(with = "time_of_day")]
    pub sleep_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub wake_time: NaiveTime,
    #[serde(with = "calendar_date")]
    pub recorded_at: NaiveDate,
}

/// Body for PUT /api/sleeptrackings/{userId}/{date}.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepTimesPayload {
    #[serde(with = "time_of_day")]
    pub sleep_time: NaiveTime,
    #[serde(with = "time_of_day")]
    pub wake_time: NaiveTime,
}
