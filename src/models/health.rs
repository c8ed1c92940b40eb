use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{timestamp, Keyed, RecordId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricType {
    Weight,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Heart Rate")]
    HeartRate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthMetric {
    #[serde(default, alias = "metricId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub metric_type: MetricType,
    #[serde(default)]
    pub heart_rate: Option<f64>,
    #[serde(default)]
    pub blood_pressure: Option<f64>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(with = "timestamp")]
    pub recorded_at: NaiveDateTime,
}

impl HealthMetric {
    pub fn date_key(&self) -> String {
        self.recorded_at.date().format("%Y-%m-%d").to_string()
    }

    pub fn carries(&self, field: MetricField) -> bool {
        match field {
            MetricField::HeartRate => self.heart_rate.is_some(),
            MetricField::BloodPressure => self.blood_pressure.is_some(),
        }
    }

    pub fn set(&mut self, field: MetricField, value: f64) {
        match field {
            MetricField::HeartRate => self.heart_rate = Some(value),
            MetricField::BloodPressure => self.blood_pressure = Some(value),
        }
    }
}

impl Keyed for HealthMetric {
    fn key(&self) -> String {
        self.date_key()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricField {
    HeartRate,
    BloodPressure,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthGoal {
    #[serde(default, alias = "goalId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub weight_goal: Option<f64>,
    #[serde(default)]
    pub bp_goal: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    Weight,
    Bp,
}

impl HealthGoal {
    /// Copy of this goal with one target replaced; the other is kept.
    pub fn with_target(&self, kind: GoalKind, value: f64) -> HealthGoal {
        let mut updated = self.clone();
        match kind {
            GoalKind::Weight => updated.weight_goal = Some(value),
            GoalKind::Bp => updated.bp_goal = Some(value),
        }
        updated
    }
}

/// PUT /health/goals
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGoalRequest {
    pub kind: GoalKind,
    #[validate(range(min = 0.0, message = "Goal must not be negative"))]
    pub value: f64,
}

/// PUT /health/metrics/{date}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMetricRequest {
    pub field: MetricField,
    #[validate(range(min = 0.0, message = "Value must not be negative"))]
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_type_wire_names() {
        let metric: HealthMetric = serde_json::from_str(
            r#"{"metricType":"Blood Pressure","bloodPressure":120,"recordedAt":"2025-09-20T07:00:00"}"#,
        )
        .unwrap();
        assert_eq!(metric.metric_type, MetricType::BloodPressure);
        assert!(metric.carries(MetricField::BloodPressure));
        assert!(!metric.carries(MetricField::HeartRate));
        assert_eq!(metric.key(), "2025-09-20");

        let other: HealthMetric =
            serde_json::from_str(r#"{"metricType":"Glucose","recordedAt":"2025-09-20"}"#).unwrap();
        assert_eq!(other.metric_type, MetricType::Other);
    }

    #[test]
    fn test_goal_with_target_keeps_other_field() {
        let goal = HealthGoal {
            id: Some(RecordId::from(4)),
            weight_goal: Some(65.0),
            bp_goal: Some(120.0),
        };
        let updated = goal.with_target(GoalKind::Bp, 115.0);
        assert_eq!(updated.weight_goal, Some(65.0));
        assert_eq!(updated.bp_goal, Some(115.0));
        assert_eq!(updated.id, goal.id);
    }
}
