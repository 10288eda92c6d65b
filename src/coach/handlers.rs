use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{jwt::AuthUser, repo::User},
    coach::{
        dto::{CelebrationRequest, CoachMessage, PromptQuery},
        messages::{self, AchievementType},
    },
    error::ApiError,
    response::{self, Envelope},
    state::AppState,
};

pub fn coach_routes() -> Router<AppState> {
    Router::new()
        .route("/coach/daily-message", get(daily_message))
        .route("/coach/prompt", get(motivational_prompt))
        .route("/coach/celebration", post(celebration))
}

#[instrument(skip(state))]
pub async fn daily_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<CoachMessage>>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(response::ok(CoachMessage::new(
        messages::daily_message(user.coach_style),
        "daily_checkin",
    )))
}

#[instrument(skip(state))]
pub async fn motivational_prompt(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(q): Query<PromptQuery>,
) -> Result<Json<Envelope<CoachMessage>>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let mut message = CoachMessage::new(
        messages::motivational_prompt(user.coach_style),
        "motivational",
    );
    message.context = q.context;
    Ok(response::ok(message))
}

#[instrument(skip(state, payload))]
pub async fn celebration(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CelebrationRequest>,
) -> Result<Json<Envelope<CoachMessage>>, ApiError> {
    // The style preference does not change celebration copy, but the user
    // must still exist
    User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    let achievement = payload.achievement_type.unwrap_or(AchievementType::Default);
    let mut message = CoachMessage::new(
        messages::celebration(achievement, payload.value),
        "celebration",
    );
    message.achievement_type = Some(achievement);
    Ok(response::ok(message))
}
