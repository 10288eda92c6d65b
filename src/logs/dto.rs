use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::logs::records::{
    ActivityType, HeartRateKind, MetricKind, MetricRecord, SleepQuality, TemperatureMethod,
};

/// Kind-specific payloads. Required values are optional here so their
/// absence is reported as a field-level validation error rather than a
/// decode failure; `loggedAt` backfills the event time when supplied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWaterRequest {
    pub amount: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogExerciseRequest {
    pub activity_type: Option<ActivityType>,
    pub custom_activity: Option<String>,
    pub duration: Option<i32>,
    pub distance: Option<f64>,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogWeightRequest {
    pub weight: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogSleepRequest {
    pub duration: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub bedtime: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub wake_time: Option<OffsetDateTime>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBloodPressureRequest {
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub pulse: Option<i32>,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogHeartRateRequest {
    pub bpm: Option<i32>,
    pub kind: Option<HeartRateKind>,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogTemperatureRequest {
    pub temperature: Option<f64>,
    pub method: Option<TemperatureMethod>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub logged_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(rename = "type")]
    pub kind: Option<MetricKind>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    pub limit: Option<i64>,
}

/// Kind-tagged update body for `PUT /health-logs/{id}`; absent fields keep
/// their stored values.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum UpdateLogRequest {
    Water {
        amount: Option<f64>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    Exercise {
        activity_type: Option<ActivityType>,
        custom_activity: Option<String>,
        duration: Option<i32>,
        distance: Option<f64>,
        notes: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    Weight {
        weight: Option<f64>,
        waist: Option<f64>,
        hips: Option<f64>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    Sleep {
        duration: Option<i32>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        bedtime: Option<OffsetDateTime>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        wake_time: Option<OffsetDateTime>,
        quality: Option<SleepQuality>,
        notes: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    BloodPressure {
        systolic: Option<i32>,
        diastolic: Option<i32>,
        pulse: Option<i32>,
        notes: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    HeartRate {
        bpm: Option<i32>,
        kind: Option<HeartRateKind>,
        notes: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
    Temperature {
        temperature: Option<f64>,
        method: Option<TemperatureMethod>,
        symptoms: Option<String>,
        notes: Option<String>,
        #[serde(default, with = "time::serde::rfc3339::option")]
        logged_at: Option<OffsetDateTime>,
    },
}

#[derive(Debug, Serialize)]
pub struct LogData {
    pub log: MetricRecord,
}

#[derive(Debug, Serialize)]
pub struct LogsData {
    pub logs: Vec<MetricRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub logs: Vec<MetricRecord>,
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_body_dispatches_on_kind_tag() {
        let body: UpdateLogRequest =
            serde_json::from_str(r#"{"type":"water","amount":750}"#).unwrap();
        assert!(matches!(
            body,
            UpdateLogRequest::Water {
                amount: Some(a),
                logged_at: None,
            } if a == 750.0
        ));
    }

    #[test]
    fn update_body_accepts_camel_case_fields() {
        let body: UpdateLogRequest = serde_json::from_str(
            r#"{"type":"exercise","activityType":"running","duration":45}"#,
        )
        .unwrap();
        match body {
            UpdateLogRequest::Exercise {
                activity_type,
                duration,
                ..
            } => {
                assert_eq!(activity_type, Some(ActivityType::Running));
                assert_eq!(duration, Some(45));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn history_query_parses_kind_and_window() {
        let q: HistoryQuery = serde_json::from_value(serde_json::json!({
            "type": "blood_pressure",
            "startDate": "2024-01-01T00:00:00Z",
            "limit": 10,
        }))
        .unwrap();
        assert_eq!(q.kind, Some(MetricKind::BloodPressure));
        assert!(q.start_date.is_some());
        assert_eq!(q.limit, Some(10));
    }
}
