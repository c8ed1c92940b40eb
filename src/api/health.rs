use chrono::NaiveDate;
use reqwest::Method;

use super::{ApiClient, FetchError};
use crate::models::{
    health::{HealthGoal, HealthMetric},
    RecordId,
};

impl ApiClient {
    /// GET /api/healthmetrics/{userId}
    pub async fn list_health_metrics(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<HealthMetric>, FetchError> {
        self.get_json(token, &format!("/api/healthmetrics/{user_id}")).await
    }

    /// GET /api/healthgoals/{userId}
    pub async fn list_health_goals(
        &self,
        token: &str,
        user_id: &RecordId,
    ) -> Result<Vec<HealthGoal>, FetchError> {
        self.get_json(token, &format!("/api/healthgoals/{user_id}")).await
    }

    /// PUT /api/goals/{userId}
    pub async fn update_health_goal(
        &self,
        token: &str,
        user_id: &RecordId,
        goal: &HealthGoal,
    ) -> Result<(), FetchError> {
        self.send(Method::PUT, token, &format!("/api/goals/{user_id}"), Some(goal))
            .await
    }

    /// PUT /api/metrics/{userId}/{yyyy-MM-dd}
    pub async fn update_health_metric(
        &self,
        token: &str,
        user_id: &RecordId,
        date: NaiveDate,
        metric: &HealthMetric,
    ) -> Result<(), FetchError> {
        let path = format!("/api/metrics/{user_id}/{}", date.format("%Y-%m-%d"));
        self.send(Method::PUT, token, &path, Some(metric)).await
    }
}
