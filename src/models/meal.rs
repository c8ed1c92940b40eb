use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{timestamp, RecordId};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMeal {
    #[serde(default, alias = "mealId", skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub food_name: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(with = "timestamp")]
    pub recorded_at: NaiveDateTime,
}
