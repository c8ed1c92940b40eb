use chrono::NaiveDate;
use reqwest::Method;

use super::{ApiClient, FetchError};
use crate::models::{
    sleep::{SleepPayload, SleepRecord, SleepTimesPayload},
    RecordId,
};

impl ApiClient {
    /// GET /api/sleeptrackings/{userId}
    pub async fn list_sleep(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<SleepRecord>, FetchError> {
        self.get_json(token, &format!("/api/sleeptrackings/{user_id}")).await
    }

    /// POST /api/sleeptrackings-create
    pub async fn create_sleep(&self, token: &str, sleep: &SleepPayload<'_>) -> Result<(), FetchError> {
        self.send(Method::POST, token, "/api/sleeptrackings-create", Some(sleep))
            .await
    }

    /// PUT /api/sleeptrackings/{userId}/{yyyy-MM-dd}
    pub async fn update_sleep(
        &self,
        token: &str,
        user_id: &RecordId,
        date: NaiveDate,
        times: &SleepTimesPayload,
    ) -> Result<(), FetchError> {
        let path = format!("/api/sleeptrackings/{user_id}/{}", date.format("%Y-%m-%d"));
        self.send(Method::PUT, token, &path, Some(times)).await
    }

    /// DELETE /api/sleeptrackings/{sleepId}
    pub async fn delete_sleep(&self, token: &str, sleep_id: &RecordId) -> Result<(), FetchError> {
        self.send::<()>(
            Method::DELETE,
            token,
            &format!("/api/sleeptrackings/{sleep_id}"),
            None,
        )
        .await
    }
}
