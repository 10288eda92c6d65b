use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::CoachStyle;

/// Per-user sharing flags, one row per user from registration onward.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    #[serde(skip_serializing)]
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    pub water_intake_shared: bool,
    pub exercise_shared: bool,
    pub weight_shared: bool,
    pub sleep_shared: bool,
    pub vital_signs_shared: bool,
    pub goals_shared: bool,
    #[serde(skip_serializing)]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing)]
    pub updated_at: OffsetDateTime,
}

impl PrivacySettings {
    pub async fn for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<PrivacySettings> {
        let settings = sqlx::query_as::<_, PrivacySettings>(
            "SELECT id, user_id, water_intake_shared, exercise_shared, weight_shared, \
                    sleep_shared, vital_signs_shared, goals_shared, created_at, updated_at \
             FROM privacy_settings WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(settings)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        patch: PrivacyPatch,
    ) -> anyhow::Result<PrivacySettings> {
        let settings = sqlx::query_as::<_, PrivacySettings>(
            "UPDATE privacy_settings SET \
                 water_intake_shared = COALESCE($2, water_intake_shared), \
                 exercise_shared = COALESCE($3, exercise_shared), \
                 weight_shared = COALESCE($4, weight_shared), \
                 sleep_shared = COALESCE($5, sleep_shared), \
                 vital_signs_shared = COALESCE($6, vital_signs_shared), \
                 goals_shared = COALESCE($7, goals_shared), \
                 updated_at = now() \
             WHERE user_id = $1 \
             RETURNING id, user_id, water_intake_shared, exercise_shared, weight_shared, \
                       sleep_shared, vital_signs_shared, goals_shared, created_at, updated_at",
        )
        .bind(user_id)
        .bind(patch.water_intake)
        .bind(patch.exercise)
        .bind(patch.weight)
        .bind(patch.sleep)
        .bind(patch.vital_signs)
        .bind(patch.goals)
        .fetch_one(db)
        .await?;
        Ok(settings)
    }
}

#[derive(Debug, Default)]
pub struct PrivacyPatch {
    pub water_intake: Option<bool>,
    pub exercise: Option<bool>,
    pub weight: Option<bool>,
    pub sleep: Option<bool>,
    pub vital_signs: Option<bool>,
    pub goals: Option<bool>,
}

pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

pub async fn update_profile(
    db: &PgPool,
    user_id: Uuid,
    patch: ProfilePatch,
) -> anyhow::Result<u64> {
    let result = sqlx::query(
        "UPDATE users SET \
             name = COALESCE($2, name), \
             age = COALESCE($3, age), \
             height = COALESCE($4, height), \
             current_weight = COALESCE($5, current_weight), \
             updated_at = now() \
         WHERE id = $1",
    )
    .bind(user_id)
    .bind(patch.name)
    .bind(patch.age)
    .bind(patch.height)
    .bind(patch.weight)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

pub async fn update_coach_style(
    db: &PgPool,
    user_id: Uuid,
    style: CoachStyle,
) -> anyhow::Result<u64> {
    let result = sqlx::query("UPDATE users SET coach_style = $2, updated_at = now() WHERE id = $1")
        .bind(user_id)
        .bind(style)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Account deletion; metric logs, goals, privacy settings, and family
/// membership rows go with it via ON DELETE CASCADE.
pub async fn delete_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
