use axum::{
    extract::State,
    routing::{delete, get, put},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{dto::PublicUser, jwt::AuthUser, repo::User},
    error::ApiError,
    response::{self, Envelope},
    state::AppState,
    users::{
        dto::{
            PrivacyData, ProfileData, UpdateCoachPreferenceRequest, UpdatePrivacyRequest,
            UpdateProfileRequest,
        },
        repo::{self, PrivacyPatch, PrivacySettings, ProfilePatch},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/profile", get(get_profile).put(update_profile))
        .route("/users/privacy", put(update_privacy))
        .route("/users/coach-preference", put(update_coach_preference))
        .route("/users", delete(delete_account))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<ProfileData>>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    Ok(response::ok(ProfileData {
        user: PublicUser::from(user),
    }))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Envelope<ProfileData>>, ApiError> {
    if let Some(name) = &payload.name {
        if name.trim().is_empty() {
            return Err(ApiError::Validation("Name must not be empty".into()));
        }
    }
    if let Some(age) = payload.age {
        if age <= 0 {
            return Err(ApiError::Validation("Age must be a positive number".into()));
        }
    }
    if payload.height.is_some_and(|h| h <= 0.0) {
        return Err(ApiError::Validation(
            "Height must be a positive number".into(),
        ));
    }
    if payload.weight.is_some_and(|w| w <= 0.0) {
        return Err(ApiError::Validation(
            "Weight must be a positive number".into(),
        ));
    }

    let updated = repo::update_profile(
        &state.db,
        user_id,
        ProfilePatch {
            name: payload.name.map(|n| n.trim().to_string()),
            age: payload.age,
            height: payload.height,
            weight: payload.weight,
        },
    )
    .await?;
    if updated == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    info!(user_id = %user_id, "profile updated");
    Ok(response::ok_msg(
        "Profile updated successfully",
        ProfileData {
            user: PublicUser::from(user),
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_privacy(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdatePrivacyRequest>,
) -> Result<Json<Envelope<PrivacyData>>, ApiError> {
    let settings = PrivacySettings::update(
        &state.db,
        user_id,
        PrivacyPatch {
            water_intake: payload.water_intake,
            exercise: payload.exercise,
            weight: payload.weight,
            sleep: payload.sleep,
            vital_signs: payload.vital_signs,
            goals: payload.goals,
        },
    )
    .await?;
    info!(user_id = %user_id, "privacy settings updated");
    Ok(response::ok_msg(
        "Privacy settings updated successfully",
        PrivacyData {
            privacy_settings: settings,
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn update_coach_preference(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<UpdateCoachPreferenceRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let updated = repo::update_coach_style(&state.db, user_id, payload.coach_style).await?;
    if updated == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }
    info!(user_id = %user_id, style = ?payload.coach_style, "coach preference updated");
    Ok(response::message_only("Coach preference updated successfully"))
}

#[instrument(skip(state))]
pub async fn delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<()>>, ApiError> {
    let deleted = repo::delete_user(&state.db, user_id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("User not found".into()));
    }
    info!(user_id = %user_id, "account deleted");
    Ok(response::message_only("Account deleted successfully"))
}
