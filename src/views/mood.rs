use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::grouping::{daily_averages, DayTotal};
use crate::models::mood::{MoodEntry, FIXED_MOOD_LABELS};

/// Occurrences per mood label. The five fixed labels are always present;
/// labels outside that set are counted under their own key.
pub fn tally(entries: &[MoodEntry]) -> BTreeMap<String, usize> {
    let mut counts: BTreeMap<String, usize> = FIXED_MOOD_LABELS
        .iter()
        .map(|label| (label.to_string(), 0))
        .collect();

    for entry in entries {
        *counts.entry(entry.mood.clone()).or_insert(0) += 1;
    }
    counts
}

/// Most recent first; equal timestamps keep API order.
pub fn newest_first(entries: &[MoodEntry]) -> Vec<MoodEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    sorted
}

/// Average stress per day, oldest first, for the trend chart.
pub fn stress_trend(entries: &[MoodEntry]) -> Vec<DayTotal> {
    daily_averages(
        entries,
        |e| e.recorded_at.date(),
        |e| f64::from(e.stress_level),
    )
}

pub fn entries_on(entries: &[MoodEntry], date: NaiveDate) -> Vec<MoodEntry> {
    entries
        .iter()
        .filter(|e| e.recorded_at.date() == date)
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct StressGauge {
    pub level: u8,
    pub percent: f64,
    pub label: String,
}

pub fn stress_gauge(level: u8) -> StressGauge {
    StressGauge {
        level,
        percent: f64::from(level) / 5.0 * 100.0,
        label: format!("Stress: {level}/5"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_timestamp;

    fn entry(mood: &str, stress: u8, at: &str) -> MoodEntry {
        MoodEntry {
            mood_id: None,
            mood: mood.into(),
            stress_level: stress,
            recorded_at: parse_timestamp(at).unwrap(),
        }
    }

    #[test]
    fn test_empty_tally_has_all_fixed_labels() {
        let counts = tally(&[]);
        assert_eq!(counts.len(), 5);
        for label in FIXED_MOOD_LABELS {
            assert_eq!(counts[label], 0);
        }
    }

    #[test]
    fn test_only_happy_keeps_other_labels() {
        let entries = vec![
            entry("Happy", 1, "2025-09-20"),
            entry("Happy", 2, "2025-09-21"),
        ];
        let counts = tally(&entries);
        assert_eq!(counts["Happy"], 2);
        assert_eq!(counts["Tired"], 0);
        assert_eq!(counts["Relaxed"], 0);
        assert_eq!(counts["Stressed"], 0);
        assert_eq!(counts["Neutral"], 0);
    }

    #[test]
    fn test_unknown_label_counted_separately() {
        let counts = tally(&[entry("Anxious", 4, "2025-09-20")]);
        assert_eq!(counts.len(), 6);
        assert_eq!(counts["Anxious"], 1);
    }

    #[test]
    fn test_newest_first_and_trend() {
        let entries = vec![
            entry("Tired", 4, "2025-09-20T08:00:00"),
            entry("Happy", 1, "2025-09-22T08:00:00"),
            entry("Stressed", 5, "2025-09-20T21:00:00"),
        ];

        let sorted = newest_first(&entries);
        assert_eq!(sorted[0].mood, "Happy");
        assert_eq!(sorted[1].mood, "Stressed");

        let trend = stress_trend(&entries);
        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].value, 4.5);
        assert_eq!(trend[1].value, 1.0);
    }

    #[test]
    fn test_stress_gauge() {
        let gauge = stress_gauge(3);
        assert_eq!(gauge.percent, 60.0);
        assert_eq!(gauge.label, "Stress: 3/5");
    }
}
