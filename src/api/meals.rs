use super::{ApiClient, FetchError};
use crate::models::{meal::DailyMeal, RecordId};

impl ApiClient {
    /// GET /api/dailymeals/{userId}
    pub async fn list_daily_meals(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<DailyMeal>, FetchError> {
        self.get_json(token, &format!("/api/dailymeals/{user_id}")).await
    }
}
