use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{timestamp, Keyed, RecordId};

/// Labels every mood tally reports, in display order.
pub const FIXED_MOOD_LABELS: [&str; 5] = ["Happy", "Tired", "Relaxed", "Stressed", "Neutral"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    #[serde(default, alias = "id", skip_serializing_if = "Option::is_none")]
    pub mood_id: Option<RecordId>,
    pub mood: String,
    pub stress_level: u8,
    #[serde(with = "timestamp")]
    pub recorded_at: NaiveDateTime,
}

impl Keyed for MoodEntry {
    fn key(&self) -> String {
        self.mood_id
            .as_ref()
            .map(|id| id.to_string())
            .unwrap_or_default()
    }
}

/// POST /mood and PUT /mood/{moodId}
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MoodRequest {
    #[validate(length(min = 1, max = 50, message = "Mood is required"))]
    pub mood: String,
    #[validate(range(min = 1, max = 5, message = "Stress level must be between 1 and 5"))]
    pub stress_level: u8,
    #[serde(default, with = "optional_timestamp")]
    pub recorded_at: Option<NaiveDateTime>,
}

/// Body for POST /api/moodtrackings-create and PUT /api/moodtrackings/{userId}/{moodId}.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodPayload<'a> {
    pub user_id: &'a RecordId,
    pub mood: &'a str,
    pub stress_level: u8,
    #[serde(with = "timestamp")]
    pub recorded_at: NaiveDateTime,
}

pub(crate) mod optional_timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => crate::models::parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {raw}"))),
        }
    }
}
