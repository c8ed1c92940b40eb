use serde::Serialize;

use crate::models::reminder::{Reminder, ReminderStatus};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReminderProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
    pub label: String,
}

pub fn progress(reminders: &[Reminder]) -> ReminderProgress {
    let completed = reminders
        .iter()
        .filter(|r| r.status == ReminderStatus::Completed)
        .count();
    let total = reminders.len();
    let percent = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    ReminderProgress {
        completed,
        total,
        percent,
        label: format!("{}% hoàn thành", percent.round() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn reminder(id: i64, status: ReminderStatus) -> Reminder {
        Reminder {
            reminder_id: RecordId::from(id),
            type_id: None,
            type_name: Some("Drink water".into()),
            status,
        }
    }

    #[test]
    fn test_progress() {
        let reminders = vec![
            reminder(1, ReminderStatus::Completed),
            reminder(2, ReminderStatus::Pending),
            reminder(3, ReminderStatus::Pending),
        ];
        let p = progress(&reminders);
        assert_eq!(p.completed, 1);
        assert_eq!(p.total, 3);
        assert_eq!(p.label, "33% hoàn thành");
    }

    #[test]
    fn test_empty_progress_is_zero() {
        let p = progress(&[]);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.label, "0% hoàn thành");
    }
}
