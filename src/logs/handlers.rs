use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser,
    error::ApiError,
    logs::{
        dashboard::{self, DashboardSummary},
        dto::{
            ExportData, HistoryQuery, LogBloodPressureRequest, LogData, LogExerciseRequest,
            LogHeartRateRequest, LogSleepRequest, LogTemperatureRequest, LogWaterRequest,
            LogWeightRequest, LogsData, UpdateLogRequest,
        },
        records::{MetricKind, MetricRecord},
        repo::{self, ExercisePatch, NewExercise, NewSleep, SleepPatch},
    },
    response::{self, Envelope},
    state::AppState,
};

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/health-logs/water", post(log_water))
        .route("/health-logs/exercise", post(log_exercise))
        .route("/health-logs/weight", post(log_weight))
        .route("/health-logs/sleep", post(log_sleep))
        .route("/health-logs/blood-pressure", post(log_blood_pressure))
        .route("/health-logs/heart-rate", post(log_heart_rate))
        .route("/health-logs/temperature", post(log_temperature))
        .route("/health-logs", get(get_history))
        .route("/health-logs/dashboard", get(get_dashboard))
        .route("/health-logs/export", get(export_logs))
        .route("/health-logs/:id", put(update_log).delete(delete_log))
}

// --- logging ---

#[instrument(skip(state, payload))]
pub async fn log_water(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogWaterRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let amount = payload
        .amount
        .filter(|a| *a > 0.0)
        .ok_or_else(|| ApiError::Validation("Amount must be a positive number".into()))?;

    let log = repo::insert_water(&state.db, user_id, amount, payload.logged_at).await?;
    info!(user_id = %user_id, amount, "water logged");
    Ok(response::created(
        "Water intake logged successfully",
        LogData {
            log: MetricRecord::Water(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_exercise(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogExerciseRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let (Some(activity_type), Some(duration)) = (payload.activity_type, payload.duration) else {
        return Err(ApiError::Validation(
            "Activity type and duration are required".into(),
        ));
    };
    if duration <= 0 {
        return Err(ApiError::Validation(
            "Duration must be a positive number".into(),
        ));
    }
    if payload.distance.is_some_and(|d| d <= 0.0) {
        return Err(ApiError::Validation(
            "Distance must be a positive number".into(),
        ));
    }

    let log = repo::insert_exercise(
        &state.db,
        user_id,
        NewExercise {
            activity_type,
            custom_activity: payload.custom_activity.as_deref(),
            duration,
            distance: payload.distance,
            notes: payload.notes.as_deref(),
            logged_at: payload.logged_at,
        },
    )
    .await?;
    info!(user_id = %user_id, activity = ?activity_type, duration, "exercise logged");
    Ok(response::created(
        "Exercise logged successfully",
        LogData {
            log: MetricRecord::Exercise(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_weight(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogWeightRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let weight = payload
        .weight
        .filter(|w| *w > 0.0)
        .ok_or_else(|| ApiError::Validation("Weight must be a positive number".into()))?;

    let log = repo::insert_weight(
        &state.db,
        user_id,
        weight,
        payload.waist,
        payload.hips,
        payload.logged_at,
    )
    .await?;
    info!(user_id = %user_id, weight, "weight logged");
    Ok(response::created(
        "Weight logged successfully",
        LogData {
            log: MetricRecord::Weight(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_sleep(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogSleepRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let duration = payload
        .duration
        .filter(|d| *d > 0)
        .ok_or_else(|| ApiError::Validation("Duration must be a positive number".into()))?;

    let log = repo::insert_sleep(
        &state.db,
        user_id,
        NewSleep {
            duration,
            bedtime: payload.bedtime,
            wake_time: payload.wake_time,
            quality: payload.quality,
            notes: payload.notes.as_deref(),
            logged_at: payload.logged_at,
        },
    )
    .await?;
    info!(user_id = %user_id, duration, "sleep logged");
    Ok(response::created(
        "Sleep logged successfully",
        LogData {
            log: MetricRecord::Sleep(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_blood_pressure(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogBloodPressureRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let (Some(systolic), Some(diastolic)) = (payload.systolic, payload.diastolic) else {
        return Err(ApiError::Validation(
            "Valid systolic and diastolic values are required".into(),
        ));
    };
    if systolic <= 0 || diastolic <= 0 {
        return Err(ApiError::Validation(
            "Valid systolic and diastolic values are required".into(),
        ));
    }

    let log = repo::insert_blood_pressure(
        &state.db,
        user_id,
        systolic,
        diastolic,
        payload.pulse,
        payload.notes.as_deref(),
        payload.logged_at,
    )
    .await?;
    info!(user_id = %user_id, systolic, diastolic, "blood pressure logged");
    Ok(response::created(
        "Blood pressure logged successfully",
        LogData {
            log: MetricRecord::BloodPressure(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_heart_rate(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogHeartRateRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let bpm = payload
        .bpm
        .filter(|b| *b > 0)
        .ok_or_else(|| ApiError::Validation("Valid BPM value is required".into()))?;

    let log = repo::insert_heart_rate(
        &state.db,
        user_id,
        bpm,
        payload.kind,
        payload.notes.as_deref(),
        payload.logged_at,
    )
    .await?;
    info!(user_id = %user_id, bpm, "heart rate logged");
    Ok(response::created(
        "Heart rate logged successfully",
        LogData {
            log: MetricRecord::HeartRate(log),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn log_temperature(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<LogTemperatureRequest>,
) -> Result<(StatusCode, Json<Envelope<LogData>>), ApiError> {
    let temperature = payload
        .temperature
        .filter(|t| *t > 0.0)
        .ok_or_else(|| ApiError::Validation("Valid temperature value is required".into()))?;

    let log = repo::insert_temperature(
        &state.db,
        user_id,
        temperature,
        payload.method,
        payload.symptoms.as_deref(),
        payload.notes.as_deref(),
        payload.logged_at,
    )
    .await?;
    info!(user_id = %user_id, temperature, "temperature logged");
    Ok(response::created(
        "Temperature logged successfully",
        LogData {
            log: MetricRecord::Temperature(log),
        },
    ))
}

// --- reads ---

#[instrument(skip(state))]
pub async fn get_history(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<Envelope<LogsData>>, ApiError> {
    let limit = q
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    let kinds: Vec<MetricKind> = match q.kind {
        Some(kind) => vec![kind],
        None => MetricKind::ALL.to_vec(),
    };

    let mut logs = Vec::new();
    for kind in kinds {
        logs.extend(repo::list(&state.db, kind, user_id, q.start_date, q.end_date, limit).await?);
    }
    logs.sort_by(|a, b| b.logged_at().cmp(&a.logged_at()));
    logs.truncate(limit as usize);

    Ok(response::ok(LogsData { logs }))
}

#[instrument(skip(state))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<DashboardSummary>>, ApiError> {
    let summary = dashboard::summarize(&state.db, user_id, dashboard::local_now()).await?;
    Ok(response::ok(summary))
}

#[instrument(skip(state))]
pub async fn export_logs(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<ExportData>>, ApiError> {
    let mut logs = Vec::new();
    for kind in MetricKind::ALL {
        logs.extend(repo::list(&state.db, kind, user_id, None, None, i64::MAX).await?);
    }
    logs.sort_by(|a, b| b.logged_at().cmp(&a.logged_at()));

    info!(user_id = %user_id, count = logs.len(), "health data exported");
    Ok(response::ok(ExportData {
        logs,
        exported_at: OffsetDateTime::now_utc(),
    }))
}

// --- mutations ---

#[instrument(skip(state, payload))]
pub async fn update_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLogRequest>,
) -> Result<Json<Envelope<LogData>>, ApiError> {
    let updated: Option<MetricRecord> = match payload {
        UpdateLogRequest::Water { amount, logged_at } => {
            if amount.is_some_and(|a| a <= 0.0) {
                return Err(ApiError::Validation("Amount must be a positive number".into()));
            }
            repo::update_water(&state.db, user_id, id, amount, logged_at)
                .await?
                .map(MetricRecord::Water)
        }
        UpdateLogRequest::Exercise {
            activity_type,
            custom_activity,
            duration,
            distance,
            notes,
            logged_at,
        } => {
            if duration.is_some_and(|d| d <= 0) {
                return Err(ApiError::Validation("Duration must be a positive number".into()));
            }
            repo::update_exercise(
                &state.db,
                user_id,
                id,
                ExercisePatch {
                    activity_type,
                    custom_activity: custom_activity.as_deref(),
                    duration,
                    distance,
                    notes: notes.as_deref(),
                    logged_at,
                },
            )
            .await?
            .map(MetricRecord::Exercise)
        }
        UpdateLogRequest::Weight {
            weight,
            waist,
            hips,
            logged_at,
        } => {
            if weight.is_some_and(|w| w <= 0.0) {
                return Err(ApiError::Validation("Weight must be a positive number".into()));
            }
            repo::update_weight(&state.db, user_id, id, weight, waist, hips, logged_at)
                .await?
                .map(MetricRecord::Weight)
        }
        UpdateLogRequest::Sleep {
            duration,
            bedtime,
            wake_time,
            quality,
            notes,
            logged_at,
        } => {
            if duration.is_some_and(|d| d <= 0) {
                return Err(ApiError::Validation("Duration must be a positive number".into()));
            }
            repo::update_sleep(
                &state.db,
                user_id,
                id,
                SleepPatch {
                    duration,
                    bedtime,
                    wake_time,
                    quality,
                    notes: notes.as_deref(),
                    logged_at,
                },
            )
            .await?
            .map(MetricRecord::Sleep)
        }
        UpdateLogRequest::BloodPressure {
            systolic,
            diastolic,
            pulse,
            notes,
            logged_at,
        } => {
            if systolic.is_some_and(|s| s <= 0) || diastolic.is_some_and(|d| d <= 0) {
                return Err(ApiError::Validation(
                    "Valid systolic and diastolic values are required".into(),
                ));
            }
            repo::update_blood_pressure(
                &state.db,
                user_id,
                id,
                systolic,
                diastolic,
                pulse,
                notes.as_deref(),
                logged_at,
            )
            .await?
            .map(MetricRecord::BloodPressure)
        }
        UpdateLogRequest::HeartRate {
            bpm,
            kind,
            notes,
            logged_at,
        } => {
            if bpm.is_some_and(|b| b <= 0) {
                return Err(ApiError::Validation("Valid BPM value is required".into()));
            }
            repo::update_heart_rate(&state.db, user_id, id, bpm, kind, notes.as_deref(), logged_at)
                .await?
                .map(MetricRecord::HeartRate)
        }
        UpdateLogRequest::Temperature {
            temperature,
            method,
            symptoms,
            notes,
            logged_at,
        } => {
            if temperature.is_some_and(|t| t <= 0.0) {
                return Err(ApiError::Validation(
                    "Valid temperature value is required".into(),
                ));
            }
            repo::update_temperature(
                &state.db,
                user_id,
                id,
                temperature,
                method,
                symptoms.as_deref(),
                notes.as_deref(),
                logged_at,
            )
            .await?
            .map(MetricRecord::Temperature)
        }
    };

    let log = updated.ok_or_else(|| ApiError::NotFound("Health log not found".into()))?;
    info!(user_id = %user_id, id = %id, kind = ?log.kind(), "health log updated");
    Ok(response::ok_msg("Health log updated successfully", LogData { log }))
}

#[instrument(skip(state))]
pub async fn delete_log(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    match repo::delete(&state.db, user_id, id).await? {
        Some(kind) => {
            info!(user_id = %user_id, id = %id, ?kind, "health log deleted");
            Ok(response::message_only("Health log deleted successfully"))
        }
        None => Err(ApiError::NotFound("Health log not found".into())),
    }
}
