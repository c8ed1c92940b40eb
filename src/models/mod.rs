//! Backend record shapes. The health API speaks camelCase JSON and is loose
//! about ids (numbers or strings) and timestamps (dates or date-times), so the
//! helpers here normalise both on the way in.

pub mod health;
pub mod meal;
pub mod mood;
pub mod reminder;
pub mod sleep;
pub mod user;

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned identifier, numeric or textual on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Int(n) => RecordId(n.to_string()),
            Raw::Float(n) => RecordId(n.to_string()),
            Raw::Text(s) => RecordId(s),
        })
    }
}

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse the timestamp shapes the backend emits for `recordedAt`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local())
}

/// Parse a local time of day, `HH:mm` or `HH:mm:ss`.
pub fn parse_time_of_day(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

/// Localized calendar-day label used by the dashboards.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// serde adapter for `recordedAt` timestamps.
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(DATE_TIME_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {raw}")))
    }
}

/// serde adapter for calendar dates that may arrive with a time component.
pub mod calendar_date {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .map(|dt| dt.date())
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised date: {raw}")))
    }
}

/// serde adapter for `HH:mm` times of day.
pub mod time_of_day {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_time_of_day(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognised time of day: {raw}")))
    }
}

/// A record that a dashboard can open in its edit dialog.
pub trait Keyed {
    /// Key used by the edit routes (`/<dashboard>/edit/{key}`).
    fn key(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_shapes() {
        let midnight = parse_timestamp("2025-09-22").unwrap();
        assert_eq!(midnight.to_string(), "2025-09-22 00:00:00");

        let dt = parse_timestamp("2025-09-22T08:15:30.250").unwrap();
        assert_eq!(dt.date(), NaiveDate::from_ymd_opt(2025, 9, 22).unwrap());

        let rfc = parse_timestamp("2025-09-22T23:10:00+07:00").unwrap();
        assert_eq!(rfc.format("%H:%M").to_string(), "23:10");

        assert!(parse_timestamp("22/09/2025").is_none());
    }

    #[test]
    fn test_parse_time_of_day() {
        assert_eq!(
            parse_time_of_day("23:30"),
            NaiveTime::from_hms_opt(23, 30, 0)
        );
        assert_eq!(
            parse_time_of_day("06:00:00"),
            NaiveTime::from_hms_opt(6, 0, 0)
        );
        assert!(parse_time_of_day("25:00").is_none());
    }

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let ids: Vec<RecordId> = serde_json::from_str(r#"[7, "abc-1"]"#).unwrap();
        assert_eq!(ids[0].as_str(), "7");
        assert_eq!(ids[1].as_str(), "abc-1");

        assert_eq!(serde_json::to_string(&ids[0]).unwrap(), "7");
        assert_eq!(serde_json::to_string(&ids[1]).unwrap(), "\"abc-1\"");
    }

    #[test]
    fn test_day_label() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(day_label(date), "05/01/2025");
    }
}
