//! Same-day summary for a user: today's totals for water and exercise, the
//! latest weight with a trend, today's sleep, and latest-known vital signs.
//!
//! The per-kind reads are issued independently (read committed per query,
//! no snapshot across them); a record logged mid-aggregation may or may not
//! show up, which is accepted behavior.

use serde::Serialize;
use sqlx::PgPool;
use time::{Duration, OffsetDateTime, Time};
use uuid::Uuid;

use crate::logs::repo;

pub const WATER_GOAL_ML: f64 = 2000.0;
pub const EXERCISE_GOAL_MINUTES: i64 = 30;
pub const SLEEP_GOAL_HOURS: f64 = 8.0;

/// A reading counts toward the trend only if it is at least this much older
/// than the latest one.
pub const TREND_LOOKBACK: Duration = Duration::days(7);
/// Weight moves smaller than this are reported as stable.
pub const TREND_DEADBAND_KG: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightTrend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub water: WaterSummary,
    pub exercise: ExerciseSummary,
    pub weight: WeightSummary,
    pub sleep: SleepSummary,
    pub vital_signs: VitalSigns,
}

#[derive(Debug, Clone, Serialize)]
pub struct WaterSummary {
    pub current: f64,
    pub goal: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseSummary {
    pub minutes: i64,
    pub goal: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeightSummary {
    pub current: Option<f64>,
    pub trend: WeightTrend,
}

#[derive(Debug, Clone, Serialize)]
pub struct SleepSummary {
    pub hours: f64,
    pub goal: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalSigns {
    pub blood_pressure: Option<BloodPressureReading>,
    pub heart_rate: Option<i32>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BloodPressureReading {
    pub systolic: i32,
    pub diastolic: i32,
}

/// Server-local "now", the reference point for the daily window. Falls back
/// to UTC when the local offset cannot be determined, which is the usual
/// case in a multi-threaded process.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Calendar-day window `[midnight, midnight + 1d)` at the offset carried by
/// `now`.
pub fn day_bounds(now: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let midnight = now.replace_time(Time::MIDNIGHT);
    (midnight, midnight + Duration::days(1))
}

pub fn classify_trend(latest: f64, prior: Option<f64>) -> WeightTrend {
    let Some(prior) = prior else {
        return WeightTrend::Stable;
    };
    let delta = latest - prior;
    if delta.abs() <= TREND_DEADBAND_KG {
        WeightTrend::Stable
    } else if delta < 0.0 {
        WeightTrend::Down
    } else {
        WeightTrend::Up
    }
}

pub async fn summarize(
    db: &PgPool,
    user_id: Uuid,
    now: OffsetDateTime,
) -> anyhow::Result<DashboardSummary> {
    let (start, end) = day_bounds(now);

    let water_total = repo::water_total_between(db, user_id, start, end).await?;
    let exercise_total = repo::exercise_total_between(db, user_id, start, end).await?;

    let latest_weight = repo::latest_weight(db, user_id).await?;
    let trend = match &latest_weight {
        Some(latest) => {
            let prior =
                repo::latest_weight_before(db, user_id, latest.logged_at - TREND_LOOKBACK).await?;
            classify_trend(latest.weight, prior.map(|p| p.weight))
        }
        None => WeightTrend::Stable,
    };

    let sleep = repo::latest_sleep_between(db, user_id, start, end).await?;
    let blood_pressure = repo::latest_blood_pressure(db, user_id).await?;
    let heart_rate = repo::latest_heart_rate(db, user_id).await?;
    let temperature = repo::latest_temperature(db, user_id).await?;

    Ok(DashboardSummary {
        water: WaterSummary {
            current: water_total,
            goal: WATER_GOAL_ML,
        },
        exercise: ExerciseSummary {
            minutes: exercise_total,
            goal: EXERCISE_GOAL_MINUTES,
        },
        weight: WeightSummary {
            current: latest_weight.map(|w| w.weight),
            trend,
        },
        sleep: SleepSummary {
            hours: sleep.map(|s| f64::from(s.duration) / 60.0).unwrap_or(0.0),
            goal: SLEEP_GOAL_HOURS,
        },
        vital_signs: VitalSigns {
            blood_pressure: blood_pressure.map(|bp| BloodPressureReading {
                systolic: bp.systolic,
                diastolic: bp.diastolic,
            }),
            heart_rate: heart_rate.map(|hr| hr.bpm),
            temperature: temperature.map(|t| t.temperature),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn day_bounds_cover_one_calendar_day() {
        let now = datetime!(2024-03-15 14:30:00 UTC);
        let (start, end) = day_bounds(now);
        assert_eq!(start, datetime!(2024-03-15 00:00:00 UTC));
        assert_eq!(end, datetime!(2024-03-16 00:00:00 UTC));
    }

    #[test]
    fn day_bounds_respect_the_supplied_offset() {
        let now = datetime!(2024-03-15 01:30:00 +02:00);
        let (start, end) = day_bounds(now);
        assert_eq!(start, datetime!(2024-03-15 00:00:00 +02:00));
        assert_eq!(end, datetime!(2024-03-16 00:00:00 +02:00));
        assert_eq!(end - start, Duration::days(1));
    }

    #[test]
    fn trend_is_stable_without_a_prior_reading() {
        assert_eq!(classify_trend(80.0, None), WeightTrend::Stable);
    }

    #[test]
    fn trend_deadband_is_inclusive() {
        assert_eq!(classify_trend(80.0, Some(80.5)), WeightTrend::Stable);
        assert_eq!(classify_trend(80.0, Some(79.5)), WeightTrend::Stable);
    }

    #[test]
    fn trend_moves_outside_the_deadband() {
        assert_eq!(classify_trend(80.0, Some(81.0)), WeightTrend::Down);
        assert_eq!(classify_trend(80.0, Some(78.9)), WeightTrend::Up);
    }

    #[test]
    fn summary_serializes_camel_case_with_nullable_fields() {
        let summary = DashboardSummary {
            water: WaterSummary {
                current: 0.0,
                goal: WATER_GOAL_ML,
            },
            exercise: ExerciseSummary {
                minutes: 0,
                goal: EXERCISE_GOAL_MINUTES,
            },
            weight: WeightSummary {
                current: None,
                trend: WeightTrend::Stable,
            },
            sleep: SleepSummary {
                hours: 0.0,
                goal: SLEEP_GOAL_HOURS,
            },
            vital_signs: VitalSigns {
                blood_pressure: None,
                heart_rate: None,
                temperature: None,
            },
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["water"]["current"], 0.0);
        assert_eq!(json["weight"]["trend"], "stable");
        assert!(json["weight"]["current"].is_null());
        assert!(json["vitalSigns"]["bloodPressure"].is_null());
    }
}
