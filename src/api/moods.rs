use reqwest::Method;

use super::{ApiClient, FetchError};
use crate::models::{
    mood::{MoodEntry, MoodPayload},
    RecordId,
};

impl ApiClient {
    /// GET /api/moodtrackings/{userId}
    pub async fn list_moods(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<MoodEntry>, FetchError> {
        self.get_json(token, &format!("/api/moodtrackings/{user_id}")).await
    }

    /// POST /api/moodtrackings-create
    pub async fn create_mood(&self, token: &str, mood: &MoodPayload<'_>) -> Result<(), FetchError> {
        self.send(Method::POST, token, "/api/moodtrackings-create", Some(mood))
            .await
    }

    /// PUT /api/moodtrackings/{userId}/{moodId}
    pub async fn update_mood(
        &self,
        token: &str,
        mood_id: &RecordId,
        mood: &MoodPayload<'_>,
    ) -> Result<(), FetchError> {
        let path = format!("/api/moodtrackings/{}/{mood_id}", mood.user_id);
        self.send(Method::PUT, token, &path, Some(mood)).await
    }

    /// DELETE /api/moodtrackings/{moodId}
    pub async fn delete_mood(&self, token: &str, mood_id: &RecordId) -> Result<(), FetchError> {
        self.send::<()>(
            Method::DELETE,
            token,
            &format!("/api/moodtrackings/{mood_id}"),
            None,
        )
        .await
    }
}
