use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_type", rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    WeightGain,
    WeightMaintenance,
    BmiTarget,
    ExerciseMinutes,
    WaterIntake,
    SleepHours,
    BloodPressure,
    HeartRate,
}

impl GoalType {
    /// Band goals track proximity to the target; the rest are monotonic
    /// progressions from a start value.
    pub fn is_band(&self) -> bool {
        matches!(
            self,
            GoalType::WeightMaintenance
                | GoalType::BmiTarget
                | GoalType::BloodPressure
                | GoalType::HeartRate
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "goal_status", rename_all = "snake_case")]
pub enum GoalStatus {
    Active,
    Completed,
    Abandoned,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: GoalType,
    pub start_value: f64,
    pub target_value: f64,
    pub current_value: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_date: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub target_date: OffsetDateTime,
    pub status: GoalStatus,
    pub is_shared: bool,
    pub action_plan: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub struct NewGoal<'a> {
    pub goal_type: GoalType,
    pub start_value: f64,
    pub target_value: f64,
    pub current_value: Option<f64>,
    pub start_date: Option<OffsetDateTime>,
    pub target_date: OffsetDateTime,
    pub is_shared: bool,
    pub action_plan: Option<&'a str>,
}

pub struct GoalPatch<'a> {
    pub target_value: Option<f64>,
    pub current_value: Option<f64>,
    pub target_date: Option<OffsetDateTime>,
    pub status: Option<GoalStatus>,
    pub is_shared: Option<bool>,
    pub action_plan: Option<&'a str>,
}

impl Goal {
    pub async fn insert(db: &PgPool, user_id: Uuid, new: NewGoal<'_>) -> anyhow::Result<Goal> {
        let goal = sqlx::query_as::<_, Goal>(
            "INSERT INTO goals \
                 (user_id, goal_type, start_value, target_value, current_value, start_date, \
                  target_date, is_shared, action_plan) \
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, now()), $7, $8, $9) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(new.goal_type)
        .bind(new.start_value)
        .bind(new.target_value)
        .bind(new.current_value)
        .bind(new.start_date)
        .bind(new.target_date)
        .bind(new.is_shared)
        .bind(new.action_plan)
        .fetch_one(db)
        .await?;
        Ok(goal)
    }

    pub async fn list_by_user(
        db: &PgPool,
        user_id: Uuid,
        status: Option<GoalStatus>,
    ) -> anyhow::Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            "SELECT * FROM goals WHERE user_id = $1 \
             AND ($2::goal_status IS NULL OR status = $2) \
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(status)
        .fetch_all(db)
        .await?;
        Ok(goals)
    }

    /// Goals the user has opted into sharing with their family.
    pub async fn list_shared(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Goal>> {
        let goals = sqlx::query_as::<_, Goal>(
            "SELECT * FROM goals WHERE user_id = $1 AND is_shared ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        Ok(goals)
    }

    pub async fn find_owned(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            "SELECT * FROM goals WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(goal)
    }

    pub async fn update(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        patch: GoalPatch<'_>,
    ) -> anyhow::Result<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            "UPDATE goals SET \
                 target_value = COALESCE($3, target_value), \
                 current_value = COALESCE($4, current_value), \
                 target_date = COALESCE($5, target_date), \
                 status = COALESCE($6, status), \
                 is_shared = COALESCE($7, is_shared), \
                 action_plan = COALESCE($8, action_plan), \
                 updated_at = now() \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .bind(patch.target_value)
        .bind(patch.current_value)
        .bind(patch.target_date)
        .bind(patch.status)
        .bind(patch.is_shared)
        .bind(patch.action_plan)
        .fetch_optional(db)
        .await?;
        Ok(goal)
    }

    pub async fn set_status(
        db: &PgPool,
        user_id: Uuid,
        id: Uuid,
        status: GoalStatus,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE goals SET status = $3, updated_at = now() WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(status)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, user_id: Uuid, id: Uuid) -> anyhow::Result<u64> {
        let result = sqlx::query("DELETE FROM goals WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(result.rows_affected())
    }
}
