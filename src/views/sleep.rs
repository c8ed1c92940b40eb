use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::{day_label, sleep::SleepRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Good,
    Average,
    NeedsImprovement,
}

impl SleepQuality {
    pub fn from_hours(hours: f64) -> Self {
        if hours >= 7.0 {
            SleepQuality::Good
        } else if hours >= 5.0 {
            SleepQuality::Average
        } else {
            SleepQuality::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SleepQuality::Good => "Tốt",
            SleepQuality::Average => "Trung bình",
            SleepQuality::NeedsImprovement => "Cần cải thiện",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SleepNight {
    pub date: NaiveDate,
    pub label: String,
    pub sleep_time: String,
    pub wake_time: String,
    pub sleep_at: NaiveDateTime,
    pub wake_at: NaiveDateTime,
    pub duration_hours: f64,
    pub quality: SleepQuality,
    pub quality_label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SleepStatistics {
    pub average_hours: f64,
    pub min_hours: f64,
    pub max_hours: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SleepView {
    /// API order, for the detail table.
    pub table: Vec<SleepNight>,
    /// Chronological, for the charts.
    pub chart: Vec<SleepNight>,
    pub statistics: Option<SleepStatistics>,
}

/// Sleep and wake instants for one record. A wake time at or before the
/// sleep time belongs to the next calendar day.
pub fn sleep_window(record: &SleepRecord) -> (NaiveDateTime, NaiveDateTime) {
    let sleep_at = record.recorded_at.and_time(record.sleep_time);
    let mut wake_at = record.recorded_at.and_time(record.wake_time);
    if wake_at <= sleep_at {
        wake_at += Duration::days(1);
    }
    (sleep_at, wake_at)
}

pub fn duration_hours(record: &SleepRecord) -> f64 {
    let (sleep_at, wake_at) = sleep_window(record);
    (wake_at - sleep_at).num_seconds() as f64 / 3600.0
}

pub fn night(record: &SleepRecord) -> SleepNight {
    let (sleep_at, wake_at) = sleep_window(record);
    let hours = (wake_at - sleep_at).num_seconds() as f64 / 3600.0;
    let quality = SleepQuality::from_hours(hours);

    SleepNight {
        date: record.recorded_at,
        label: day_label(record.recorded_at),
        sleep_time: record.sleep_time.format("%H:%M").to_string(),
        wake_time: record.wake_time.format("%H:%M").to_string(),
        sleep_at,
        wake_at,
        duration_hours: hours,
        quality,
        quality_label: quality.label(),
    }
}

/// Nights sorted ascending by date; equal dates keep API order.
pub fn chart_nights(records: &[SleepRecord]) -> Vec<SleepNight> {
    let mut nights: Vec<SleepNight> = records.iter().map(night).collect();
    nights.sort_by_key(|n| n.date);
    nights
}

pub fn statistics(nights: &[SleepNight]) -> Option<SleepStatistics> {
    if nights.is_empty() {
        return None;
    }

    let durations = nights.iter().map(|n| n.duration_hours);
    let sum: f64 = durations.clone().sum();
    let min = durations.clone().fold(f64::INFINITY, f64::min);
    let max = durations.fold(f64::NEG_INFINITY, f64::max);

    Some(SleepStatistics {
        average_hours: sum / nights.len() as f64,
        min_hours: min,
        max_hours: max,
    })
}

pub fn build(records: &[SleepRecord]) -> SleepView {
    let chart = chart_nights(records);
    let statistics = statistics(&chart);
    SleepView {
        table: records.iter().map(night).collect(),
        chart,
        statistics,
    }
}
