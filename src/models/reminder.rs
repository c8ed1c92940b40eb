use serde::{Deserialize, Serialize};
use validator::Validate;

use super::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderStatus {
    Pending,
    Completed,
}

impl ReminderStatus {
    pub fn toggled(self) -> Self {
        match self {
            ReminderStatus::Pending => ReminderStatus::Completed,
            ReminderStatus::Completed => ReminderStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    #[serde(alias = "id")]
    pub reminder_id: RecordId,
    #[serde(default)]
    pub type_id: Option<RecordId>,
    #[serde(default)]
    pub type_name: Option<String>,
    pub status: ReminderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderType {
    #[serde(alias = "id")]
    pub type_id: RecordId,
    pub type_name: String,
}

/// POST /reminder
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReminderRequest {
    pub type_id: RecordId,
    #[validate(length(max = 100))]
    pub type_name: Option<String>,
}

/// PUT /reminder/{reminderId}/status. A missing status flips the current one.
#[derive(Debug, Deserialize)]
pub struct ReminderStatusRequest {
    pub status: Option<ReminderStatus>,
}

/// Body for POST /api/reminders-create.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderPayload<'a> {
    pub user_id: &'a RecordId,
    pub type_id: &'a RecordId,
    pub status: ReminderStatus,
}

/// Body for PUT /api/reminders/{userId}/{reminderId}.
#[derive(Debug, Serialize)]
pub struct StatusPayload {
    pub status: ReminderStatus,
}
