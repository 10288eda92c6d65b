use sqlx::{postgres::PgRow, FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::logs::records::{
    ActivityType, BloodPressureLog, ExerciseLog, HeartRateKind, HeartRateLog, MetricKind,
    MetricRecord, SleepLog, SleepQuality, TemperatureLog, TemperatureMethod, WaterLog, WeightLog,
};

// --- inserts ---

pub async fn insert_water(
    db: &PgPool,
    user_id: Uuid,
    amount: f64,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<WaterLog> {
    let log = sqlx::query_as::<_, WaterLog>(
        "INSERT INTO water_logs (user_id, amount, logged_at) \
         VALUES ($1, $2, COALESCE($3, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(amount)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub struct NewExercise<'a> {
    pub activity_type: ActivityType,
    pub custom_activity: Option<&'a str>,
    pub duration: i32,
    pub distance: Option<f64>,
    pub notes: Option<&'a str>,
    pub logged_at: Option<OffsetDateTime>,
}

pub async fn insert_exercise(
    db: &PgPool,
    user_id: Uuid,
    new: NewExercise<'_>,
) -> anyhow::Result<ExerciseLog> {
    let log = sqlx::query_as::<_, ExerciseLog>(
        "INSERT INTO exercise_logs \
             (user_id, activity_type, custom_activity, duration, distance, notes, logged_at) \
         VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(new.activity_type)
    .bind(new.custom_activity)
    .bind(new.duration)
    .bind(new.distance)
    .bind(new.notes)
    .bind(new.logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn insert_weight(
    db: &PgPool,
    user_id: Uuid,
    weight: f64,
    waist: Option<f64>,
    hips: Option<f64>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<WeightLog> {
    let log = sqlx::query_as::<_, WeightLog>(
        "INSERT INTO weight_logs (user_id, weight, waist, hips, logged_at) \
         VALUES ($1, $2, $3, $4, COALESCE($5, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(weight)
    .bind(waist)
    .bind(hips)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub struct NewSleep<'a> {
    pub duration: i32,
    pub bedtime: Option<OffsetDateTime>,
    pub wake_time: Option<OffsetDateTime>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<&'a str>,
    pub logged_at: Option<OffsetDateTime>,
}

pub async fn insert_sleep(db: &PgPool, user_id: Uuid, new: NewSleep<'_>) -> anyhow::Result<SleepLog> {
    let log = sqlx::query_as::<_, SleepLog>(
        "INSERT INTO sleep_logs (user_id, duration, bedtime, wake_time, quality, notes, logged_at) \
         VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(new.duration)
    .bind(new.bedtime)
    .bind(new.wake_time)
    .bind(new.quality)
    .bind(new.notes)
    .bind(new.logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn insert_blood_pressure(
    db: &PgPool,
    user_id: Uuid,
    systolic: i32,
    diastolic: i32,
    pulse: Option<i32>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<BloodPressureLog> {
    let log = sqlx::query_as::<_, BloodPressureLog>(
        "INSERT INTO blood_pressure_logs (user_id, systolic, diastolic, pulse, notes, logged_at) \
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(systolic)
    .bind(diastolic)
    .bind(pulse)
    .bind(notes)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn insert_heart_rate(
    db: &PgPool,
    user_id: Uuid,
    bpm: i32,
    kind: Option<HeartRateKind>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<HeartRateLog> {
    let log = sqlx::query_as::<_, HeartRateLog>(
        "INSERT INTO heart_rate_logs (user_id, bpm, kind, notes, logged_at) \
         VALUES ($1, $2, $3, $4, COALESCE($5, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(bpm)
    .bind(kind)
    .bind(notes)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

pub async fn insert_temperature(
    db: &PgPool,
    user_id: Uuid,
    temperature: f64,
    method: Option<TemperatureMethod>,
    symptoms: Option<&str>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<TemperatureLog> {
    let log = sqlx::query_as::<_, TemperatureLog>(
        "INSERT INTO temperature_logs (user_id, temperature, method, symptoms, notes, logged_at) \
         VALUES ($1, $2, $3, $4, $5, COALESCE($6, now())) RETURNING *",
    )
    .bind(user_id)
    .bind(temperature)
    .bind(method)
    .bind(symptoms)
    .bind(notes)
    .bind(logged_at)
    .fetch_one(db)
    .await?;
    Ok(log)
}

// --- reads ---

/// Shared fetch for all seven kinds: every metric table carries user_id,
/// logged_at, and created_at, so the filter shape is identical.
async fn fetch_kind<T>(
    db: &PgPool,
    table: &str,
    user_id: Uuid,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
    limit: i64,
) -> anyhow::Result<Vec<T>>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let rows = sqlx::query_as::<_, T>(&format!(
        "SELECT * FROM {table} WHERE user_id = $1 \
         AND ($2::timestamptz IS NULL OR logged_at >= $2) \
         AND ($3::timestamptz IS NULL OR logged_at <= $3) \
         ORDER BY logged_at DESC, created_at DESC LIMIT $4"
    ))
    .bind(user_id)
    .bind(start)
    .bind(end)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list(
    db: &PgPool,
    kind: MetricKind,
    user_id: Uuid,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
    limit: i64,
) -> anyhow::Result<Vec<MetricRecord>> {
    let table = kind.table();
    let records = match kind {
        MetricKind::Water => fetch_kind::<WaterLog>(db, table, user_id, start, end, limit)
            .await?
            .into_iter()
            .map(MetricRecord::Water)
            .collect(),
        MetricKind::Exercise => fetch_kind::<ExerciseLog>(db, table, user_id, start, end, limit)
            .await?
            .into_iter()
            .map(MetricRecord::Exercise)
            .collect(),
        MetricKind::Weight => fetch_kind::<WeightLog>(db, table, user_id, start, end, limit)
            .await?
            .into_iter()
            .map(MetricRecord::Weight)
            .collect(),
        MetricKind::Sleep => fetch_kind::<SleepLog>(db, table, user_id, start, end, limit)
            .await?
            .into_iter()
            .map(MetricRecord::Sleep)
            .collect(),
        MetricKind::BloodPressure => {
            fetch_kind::<BloodPressureLog>(db, table, user_id, start, end, limit)
                .await?
                .into_iter()
                .map(MetricRecord::BloodPressure)
                .collect()
        }
        MetricKind::HeartRate => fetch_kind::<HeartRateLog>(db, table, user_id, start, end, limit)
            .await?
            .into_iter()
            .map(MetricRecord::HeartRate)
            .collect(),
        MetricKind::Temperature => {
            fetch_kind::<TemperatureLog>(db, table, user_id, start, end, limit)
                .await?
                .into_iter()
                .map(MetricRecord::Temperature)
                .collect()
        }
    };
    Ok(records)
}

pub async fn water_total_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<f64> {
    let total = sqlx::query_scalar::<_, f64>(
        "SELECT COALESCE(SUM(amount), 0) FROM water_logs \
         WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_one(db)
    .await?;
    Ok(total)
}

pub async fn exercise_total_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<i64> {
    let total = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(duration), 0)::BIGINT FROM exercise_logs \
         WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_one(db)
    .await?;
    Ok(total)
}

pub async fn latest_weight(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<WeightLog>> {
    let log = sqlx::query_as::<_, WeightLog>(
        "SELECT * FROM weight_logs WHERE user_id = $1 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn latest_weight_before(
    db: &PgPool,
    user_id: Uuid,
    cutoff: OffsetDateTime,
) -> anyhow::Result<Option<WeightLog>> {
    let log = sqlx::query_as::<_, WeightLog>(
        "SELECT * FROM weight_logs WHERE user_id = $1 AND logged_at <= $2 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(cutoff)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn latest_sleep_between(
    db: &PgPool,
    user_id: Uuid,
    from: OffsetDateTime,
    to: OffsetDateTime,
) -> anyhow::Result<Option<SleepLog>> {
    let log = sqlx::query_as::<_, SleepLog>(
        "SELECT * FROM sleep_logs WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .bind(from)
    .bind(to)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn latest_blood_pressure(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<BloodPressureLog>> {
    let log = sqlx::query_as::<_, BloodPressureLog>(
        "SELECT * FROM blood_pressure_logs WHERE user_id = $1 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn latest_heart_rate(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<HeartRateLog>> {
    let log = sqlx::query_as::<_, HeartRateLog>(
        "SELECT * FROM heart_rate_logs WHERE user_id = $1 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn latest_temperature(
    db: &PgPool,
    user_id: Uuid,
) -> anyhow::Result<Option<TemperatureLog>> {
    let log = sqlx::query_as::<_, TemperatureLog>(
        "SELECT * FROM temperature_logs WHERE user_id = $1 \
         ORDER BY logged_at DESC, created_at DESC LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

// --- mutations ---

pub async fn update_water(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    amount: Option<f64>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<WaterLog>> {
    let log = sqlx::query_as::<_, WaterLog>(
        "UPDATE water_logs SET amount = COALESCE($3, amount), \
             logged_at = COALESCE($4, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(amount)
    .bind(logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub struct ExercisePatch<'a> {
    pub activity_type: Option<ActivityType>,
    pub custom_activity: Option<&'a str>,
    pub duration: Option<i32>,
    pub distance: Option<f64>,
    pub notes: Option<&'a str>,
    pub logged_at: Option<OffsetDateTime>,
}

pub async fn update_exercise(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: ExercisePatch<'_>,
) -> anyhow::Result<Option<ExerciseLog>> {
    let log = sqlx::query_as::<_, ExerciseLog>(
        "UPDATE exercise_logs SET \
             activity_type = COALESCE($3, activity_type), \
             custom_activity = COALESCE($4, custom_activity), \
             duration = COALESCE($5, duration), \
             distance = COALESCE($6, distance), \
             notes = COALESCE($7, notes), \
             logged_at = COALESCE($8, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.activity_type)
    .bind(patch.custom_activity)
    .bind(patch.duration)
    .bind(patch.distance)
    .bind(patch.notes)
    .bind(patch.logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn update_weight(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    weight: Option<f64>,
    waist: Option<f64>,
    hips: Option<f64>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<WeightLog>> {
    let log = sqlx::query_as::<_, WeightLog>(
        "UPDATE weight_logs SET weight = COALESCE($3, weight), \
             waist = COALESCE($4, waist), hips = COALESCE($5, hips), \
             logged_at = COALESCE($6, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(weight)
    .bind(waist)
    .bind(hips)
    .bind(logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub struct SleepPatch<'a> {
    pub duration: Option<i32>,
    pub bedtime: Option<OffsetDateTime>,
    pub wake_time: Option<OffsetDateTime>,
    pub quality: Option<SleepQuality>,
    pub notes: Option<&'a str>,
    pub logged_at: Option<OffsetDateTime>,
}

pub async fn update_sleep(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    patch: SleepPatch<'_>,
) -> anyhow::Result<Option<SleepLog>> {
    let log = sqlx::query_as::<_, SleepLog>(
        "UPDATE sleep_logs SET duration = COALESCE($3, duration), \
             bedtime = COALESCE($4, bedtime), wake_time = COALESCE($5, wake_time), \
             quality = COALESCE($6, quality), notes = COALESCE($7, notes), \
             logged_at = COALESCE($8, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(patch.duration)
    .bind(patch.bedtime)
    .bind(patch.wake_time)
    .bind(patch.quality)
    .bind(patch.notes)
    .bind(patch.logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn update_blood_pressure(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    systolic: Option<i32>,
    diastolic: Option<i32>,
    pulse: Option<i32>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<BloodPressureLog>> {
    let log = sqlx::query_as::<_, BloodPressureLog>(
        "UPDATE blood_pressure_logs SET systolic = COALESCE($3, systolic), \
             diastolic = COALESCE($4, diastolic), pulse = COALESCE($5, pulse), \
             notes = COALESCE($6, notes), logged_at = COALESCE($7, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(systolic)
    .bind(diastolic)
    .bind(pulse)
    .bind(notes)
    .bind(logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn update_heart_rate(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    bpm: Option<i32>,
    kind: Option<HeartRateKind>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<HeartRateLog>> {
    let log = sqlx::query_as::<_, HeartRateLog>(
        "UPDATE heart_rate_logs SET bpm = COALESCE($3, bpm), \
             kind = COALESCE($4, kind), notes = COALESCE($5, notes), \
             logged_at = COALESCE($6, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(bpm)
    .bind(kind)
    .bind(notes)
    .bind(logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

pub async fn update_temperature(
    db: &PgPool,
    user_id: Uuid,
    id: Uuid,
    temperature: Option<f64>,
    method: Option<TemperatureMethod>,
    symptoms: Option<&str>,
    notes: Option<&str>,
    logged_at: Option<OffsetDateTime>,
) -> anyhow::Result<Option<TemperatureLog>> {
    let log = sqlx::query_as::<_, TemperatureLog>(
        "UPDATE temperature_logs SET temperature = COALESCE($3, temperature), \
             method = COALESCE($4, method), symptoms = COALESCE($5, symptoms), \
             notes = COALESCE($6, notes), logged_at = COALESCE($7, logged_at) \
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(temperature)
    .bind(method)
    .bind(symptoms)
    .bind(notes)
    .bind(logged_at)
    .fetch_optional(db)
    .await?;
    Ok(log)
}

/// Delete an owned record by id, whichever table it lives in. Returns the
/// kind that was removed, or None when no table holds the id for this user.
pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<MetricKind>> {
    for kind in MetricKind::ALL {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE id = $1 AND user_id = $2",
            kind.table()
        ))
        .bind(id)
        .bind(user_id)
        .execute(db)
        .await?;
        if result.rows_affected() > 0 {
            return Ok(Some(kind));
        }
    }
    Ok(None)
}
