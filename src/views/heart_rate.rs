use serde::Serialize;

use crate::models::health::{HealthMetric, MetricType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartRateSummary {
    pub latest: f64,
    pub average: i64,
}

/// Latest and average heart rate over records that carry one.
///
/// "Latest" is the most recently dated record; among equal dates the first
/// in API order wins. Both figures are 0 when nothing qualifies.
pub fn summarize(metrics: &[HealthMetric]) -> HeartRateSummary {
    let with_rate: Vec<(&HealthMetric, f64)> = metrics
        .iter()
        .filter_map(|m| m.heart_rate.map(|hr| (m, hr)))
        .collect();

    if with_rate.is_empty() {
        return HeartRateSummary {
            latest: 0.0,
            average: 0,
        };
    }

    let mut latest = with_rate[0];
    for candidate in &with_rate[1..] {
        if candidate.0.recorded_at > latest.0.recorded_at {
            latest = *candidate;
        }
    }

    let sum: f64 = with_rate.iter().map(|(_, hr)| hr).sum();
    let average = (sum / with_rate.len() as f64).round() as i64;

    HeartRateSummary {
        latest: latest.1,
        average,
    }
}

/// Blood-pressure readings for the area chart.
pub fn blood_pressure_series(metrics: &[HealthMetric]) -> Vec<HealthMetric> {
    metrics
        .iter()
        .filter(|m| m.metric_type == MetricType::BloodPressure)
        .cloned()
        .collect()
}
