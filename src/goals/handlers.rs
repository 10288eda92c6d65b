use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    error::ApiError,
    goals::{
        dto::{
            CreateGoalRequest, GoalData, GoalListQuery, GoalsData, ProgressData, UpdateGoalRequest,
        },
        progress,
        repo::{Goal, GoalPatch, GoalStatus, GoalType, NewGoal},
    },
    logs::{dashboard, repo as logs_repo},
    response::{self, Envelope},
    state::AppState,
};

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/:id",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/:id/progress", get(get_progress))
}

/// Seed value a fresh goal measures progress from when the client does not
/// supply one: weight goals start from the best known weight, additive
/// goals start from zero.
async fn default_start_value(
    db: &sqlx::PgPool,
    user: &User,
    goal_type: GoalType,
) -> anyhow::Result<f64> {
    match goal_type {
        GoalType::WeightLoss
        | GoalType::WeightGain
        | GoalType::WeightMaintenance
        | GoalType::BmiTarget => {
            if let Some(weight) = user.current_weight {
                return Ok(weight);
            }
            Ok(logs_repo::latest_weight(db, user.id)
                .await?
                .map(|w| w.weight)
                .unwrap_or(0.0))
        }
        _ => Ok(0.0),
    }
}

#[instrument(skip(state, payload))]
pub async fn create_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateGoalRequest>,
) -> Result<(StatusCode, Json<Envelope<GoalData>>), ApiError> {
    let (Some(goal_type), Some(target_value), Some(target_date)) =
        (payload.goal_type, payload.target_value, payload.target_date)
    else {
        return Err(ApiError::Validation(
            "Goal type, target value, and target date are required".into(),
        ));
    };
    if target_value <= 0.0 {
        return Err(ApiError::Validation(
            "Target value must be a positive number".into(),
        ));
    }
    let start_date = payload.start_date.unwrap_or_else(dashboard::local_now);
    if target_date <= start_date {
        return Err(ApiError::Validation(
            "Target date must be after the start date".into(),
        ));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let start_value = match payload.start_value {
        Some(v) => v,
        None => default_start_value(&state.db, &user, goal_type).await?,
    };

    let goal = Goal::insert(
        &state.db,
        user_id,
        NewGoal {
            goal_type,
            start_value,
            target_value,
            current_value: payload.current_value,
            start_date: payload.start_date,
            target_date,
            is_shared: payload.is_shared.unwrap_or(true),
            action_plan: payload.action_plan.as_deref(),
        },
    )
    .await?;

    info!(user_id = %user_id, goal_id = %goal.id, goal_type = ?goal_type, "goal created");
    Ok(response::created(
        "Goal created successfully",
        GoalData { goal },
    ))
}

#[instrument(skip(state))]
pub async fn list_goals(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<GoalListQuery>,
) -> Result<Json<Envelope<GoalsData>>, ApiError> {
    let goals = Goal::list_by_user(&state.db, user_id, q.status).await?;
    Ok(response::ok(GoalsData { goals }))
}

#[instrument(skip(state))]
pub async fn get_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<GoalData>>, ApiError> {
    let goal = Goal::find_owned(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Goal not found".into()))?;
    Ok(response::ok(GoalData { goal }))
}

#[instrument(skip(state, payload))]
pub async fn update_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateGoalRequest>,
) -> Result<Json<Envelope<GoalData>>, ApiError> {
    let existing = Goal::find_owned(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Goal not found".into()))?;

    if payload.target_value.is_some_and(|v| v <= 0.0) {
        return Err(ApiError::Validation(
            "Target value must be a positive number".into(),
        ));
    }
    if let Some(target_date) = payload.target_date {
        if target_date <= existing.start_date {
            return Err(ApiError::Validation(
                "Target date must be after the start date".into(),
            ));
        }
    }
    // Completed and abandoned are terminal
    if let Some(next) = payload.status {
        match existing.status {
            GoalStatus::Completed if next != GoalStatus::Completed => {
                return Err(ApiError::InvalidState(
                    "Cannot change status of a completed goal".into(),
                ));
            }
            GoalStatus::Abandoned if next != GoalStatus::Abandoned => {
                return Err(ApiError::InvalidState(
                    "Cannot change status of an abandoned goal".into(),
                ));
            }
            _ => {}
        }
    }

    let goal = Goal::update(
        &state.db,
        user_id,
        id,
        GoalPatch {
            target_value: payload.target_value,
            current_value: payload.current_value,
            target_date: payload.target_date,
            status: payload.status,
            is_shared: payload.is_shared,
            action_plan: payload.action_plan.as_deref(),
        },
    )
    .await?
    .ok_or_else(|| ApiError::NotFound("Goal not found".into()))?;

    info!(user_id = %user_id, goal_id = %id, "goal updated");
    Ok(response::ok_msg("Goal updated successfully", GoalData { goal }))
}

#[instrument(skip(state))]
pub async fn delete_goal(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let deleted = Goal::delete(&state.db, user_id, id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Goal not found".into()));
    }
    info!(user_id = %user_id, goal_id = %id, "goal deleted");
    Ok(response::message_only("Goal deleted successfully"))
}

#[instrument(skip(state))]
pub async fn get_progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<ProgressData>>, ApiError> {
    let goal = Goal::find_owned(&state.db, user_id, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Goal not found".into()))?;
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let derived =
        progress::derive_current(&state.db, &user, &goal, dashboard::local_now()).await?;
    let current = progress::resolve_current(&goal, derived);
    let value = progress::compute(goal.goal_type, goal.start_value, goal.target_value, current);

    // Reaching 100 completes an active goal
    let mut status = goal.status;
    if status == GoalStatus::Active && value >= 100.0 {
        Goal::set_status(&state.db, user_id, id, GoalStatus::Completed).await?;
        status = GoalStatus::Completed;
        info!(user_id = %user_id, goal_id = %id, "goal completed");
    }

    Ok(response::ok(ProgressData {
        goal_id: goal.id,
        goal_type: goal.goal_type,
        progress: value,
        current_value: current,
        target_value: goal.target_value,
        status,
    }))
}
