use reqwest::Method;

use super::{ApiClient, FetchError};
use crate::models::{
    reminder::{Reminder, ReminderPayload, ReminderType, StatusPayload},
    RecordId,
};

impl ApiClient {
    /// GET /api/reminders/{userId}
    pub async fn list_reminders(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<Reminder>, FetchError> {
        self.get_json(token, &format!("/api/reminders/{user_id}")).await
    }

    /// GET /api/remindertypes
    pub async fn list_reminder_types(&self, token: &str) -> Result<Vec<ReminderType>, FetchError> {
        self.get_json(token, "/api/remindertypes").await
    }

    /// POST /api/reminders-create
    pub async fn create_reminder(
        &self,
        token: &str,
        reminder: &ReminderPayload<'_>,
    ) -> Result<(), FetchError> {
        self.send(Method::POST, token, "/api/reminders-create", Some(reminder))
            .await
    }

    /// PUT /api/reminders/{userId}/{reminderId}
    pub async fn update_reminder_status(
        &self,
        token: &str,
        user_id: &RecordId,
        reminder_id: &RecordId,
        status: &StatusPayload,
    ) -> Result<(), FetchError> {
        let path = format!("/api/reminders/{user_id}/{reminder_id}");
        self.send(Method::PUT, token, &path, Some(status)).await
    }
}
