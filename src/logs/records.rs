//! The seven metric record kinds behind one tagged sum type, so history
//! merging, mutation dispatch, and export walk a single abstraction instead
//! of per-table copies.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Water,
    Exercise,
    Weight,
    Sleep,
    BloodPressure,
    HeartRate,
    Temperature,
}

impl MetricKind {
    pub const ALL: [MetricKind; 7] = [
        MetricKind::Water,
        MetricKind::Exercise,
        MetricKind::Weight,
        MetricKind::Sleep,
        MetricKind::BloodPressure,
        MetricKind::HeartRate,
        MetricKind::Temperature,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            MetricKind::Water => "water_logs",
            MetricKind::Exercise => "exercise_logs",
            MetricKind::Weight => "weight_logs",
            MetricKind::Sleep => "sleep_logs",
            MetricKind::BloodPressure => "blood_pressure_logs",
            MetricKind::HeartRate => "heart_rate_logs",
            MetricKind::Temperature => "temperature_logs",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "activity_type", rename_all = "snake_case")]
pub enum ActivityType {
    Walking,
    Running,
    Hiking,
    Cycling,
    Swimming,
    Yoga,
    StrengthTraining,
    Sports,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "sleep_quality", rename_all = "snake_case")]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "heart_rate_kind", rename_all = "snake_case")]
pub enum HeartRateKind {
    Resting,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "temperature_method", rename_all = "snake_case")]
pub enum TemperatureMethod {
    Oral,
    Forehead,
    Ear,
    Armpit,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WaterLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub amount: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub activity_type: ActivityType,
    pub custom_activity: Option<String>,
    pub duration: i32,
    pub distance: Option<f64>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WeightLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight: f64,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SleepLog {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Minutes asleep.
    pub duration: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub bedtime: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub wake_time: Option<OffsetDateTime>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub systolic: i32,
    pub diastolic: i32,
    pub pulse: Option<i32>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bpm: i32,
    pub kind: Option<HeartRateKind>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub temperature: f64,
    pub method: Option<TemperatureMethod>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub logged_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A single timestamped health measurement of one kind, tagged with `type`
/// on the wire.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MetricRecord {
    Water(WaterLog),
    Exercise(ExerciseLog),
    Weight(WeightLog),
    Sleep(SleepLog),
    BloodPressure(BloodPressureLog),
    HeartRate(HeartRateLog),
    Temperature(TemperatureLog),
}

impl MetricRecord {
    pub fn kind(&self) -> MetricKind {
        match self {
            MetricRecord::Water(_) => MetricKind::Water,
            MetricRecord::Exercise(_) => MetricKind::Exercise,
            MetricRecord::Weight(_) => MetricKind::Weight,
            MetricRecord::Sleep(_) => MetricKind::Sleep,
            MetricRecord::BloodPressure(_) => MetricKind::BloodPressure,
            MetricRecord::HeartRate(_) => MetricKind::HeartRate,
            MetricRecord::Temperature(_) => MetricKind::Temperature,
        }
    }

    pub fn logged_at(&self) -> OffsetDateTime {
        match self {
            MetricRecord::Water(l) => l.logged_at,
            MetricRecord::Exercise(l) => l.logged_at,
            MetricRecord::Weight(l) => l.logged_at,
            MetricRecord::Sleep(l) => l.logged_at,
            MetricRecord::BloodPressure(l) => l.logged_at,
            MetricRecord::HeartRate(l) => l.logged_at,
            MetricRecord::Temperature(l) => l.logged_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_kind_tag() {
        let record = MetricRecord::Water(WaterLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: 500.0,
            logged_at: OffsetDateTime::UNIX_EPOCH,
            created_at: OffsetDateTime::UNIX_EPOCH,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "water");
        assert_eq!(json["amount"], 500.0);
    }

    #[test]
    fn multiword_kinds_use_snake_case_tags() {
        let record = MetricRecord::BloodPressure(BloodPressureLog {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            systolic: 120,
            diastolic: 80,
            pulse: None,
            notes: None,
            logged_at: OffsetDateTime::UNIX_EPOCH,
            created_at: OffsetDateTime::UNIX_EPOCH,
        });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "blood_pressure");
    }

    #[test]
    fn kind_accessor_matches_variant() {
        for kind in MetricKind::ALL {
            assert!(!kind.table().is_empty());
        }
        let query_param: MetricKind = serde_json::from_str("\"blood_pressure\"").unwrap();
        assert_eq!(query_param, MetricKind::BloodPressure);
    }
}
