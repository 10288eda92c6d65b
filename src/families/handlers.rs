use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{handlers::is_valid_email, jwt::AuthUser, repo::User},
    error::ApiError,
    families::{
        dto::{
            CreateFamilyRequest, FamilyDashboard, FamilyDashboardData, FamilyData, FamilyDetails,
            FamilyDetailsData, InvitationData, InviteMemberRequest,
        },
        repo::{Family, FamilyInvitation},
        visibility::filter_member_view,
    },
    goals::repo::Goal,
    logs::dashboard,
    response::{self, Envelope},
    state::AppState,
    users::repo::PrivacySettings,
};

const INVITATION_TTL: Duration = Duration::days(7);

pub fn family_routes() -> Router<AppState> {
    Router::new()
        .route("/families", post(create_family))
        .route("/families/:id", get(get_family))
        .route("/families/:id/dashboard", get(get_family_dashboard))
        .route("/families/:id/invite", post(invite_member))
        .route("/families/accept-invite/:token", post(accept_invite))
        .route("/families/:id/members/:member_id", delete(remove_member))
        .route("/families/:id/leave", post(leave_family))
}

/// Load the family and confirm the caller belongs to it.
async fn member_family(
    state: &AppState,
    family_id: Uuid,
    user_id: Uuid,
) -> Result<Family, ApiError> {
    let family = Family::find(&state.db, family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Family not found".into()))?;
    if !Family::is_member(&state.db, family_id, user_id).await? {
        warn!(user_id = %user_id, family_id = %family_id, "non-member access rejected");
        return Err(ApiError::Authorization(
            "Not a member of this family".into(),
        ));
    }
    Ok(family)
}

#[instrument(skip(state, payload))]
pub async fn create_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CreateFamilyRequest>,
) -> Result<(StatusCode, Json<Envelope<FamilyData>>), ApiError> {
    let name = payload
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ApiError::Validation("Family name is required".into()))?;

    if Family::of_user(&state.db, user_id).await?.is_some() {
        return Err(ApiError::Validation(
            "Already a member of a family".into(),
        ));
    }

    let family = Family::create(&state.db, &name, user_id).await?;
    info!(user_id = %user_id, family_id = %family.id, "family created");
    Ok(response::created(
        "Family group created successfully",
        FamilyData { family },
    ))
}

#[instrument(skip(state))]
pub async fn get_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(family_id): Path<Uuid>,
) -> Result<Json<Envelope<FamilyDetailsData>>, ApiError> {
    let family = member_family(&state, family_id, user_id).await?;
    let members = Family::members(&state.db, family_id).await?;
    Ok(response::ok(FamilyDetailsData {
        family: FamilyDetails { family, members },
    }))
}

#[instrument(skip(state))]
pub async fn get_family_dashboard(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(family_id): Path<Uuid>,
) -> Result<Json<Envelope<FamilyDashboardData>>, ApiError> {
    member_family(&state, family_id, user_id).await?;
    let members = Family::members(&state.db, family_id).await?;
    let now = dashboard::local_now();

    let mut views = Vec::with_capacity(members.len());
    for member in &members {
        let summary = dashboard::summarize(&state.db, member.user_id, now).await?;
        let settings = PrivacySettings::for_user(&state.db, member.user_id).await?;
        let goals = if member.user_id == user_id {
            Goal::list_by_user(&state.db, member.user_id, None).await?
        } else {
            Goal::list_shared(&state.db, member.user_id).await?
        };
        views.push(filter_member_view(
            user_id,
            member.user_id,
            &member.name,
            &settings,
            summary,
            goals,
        ));
    }

    Ok(response::ok(FamilyDashboardData {
        dashboard: FamilyDashboard {
            family_id,
            members: views,
        },
    }))
}

#[instrument(skip(state, payload))]
pub async fn invite_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(family_id): Path<Uuid>,
    Json(payload): Json<InviteMemberRequest>,
) -> Result<Json<Envelope<InvitationData>>, ApiError> {
    let family = member_family(&state, family_id, user_id).await?;
    if family.admin_id != Some(user_id) {
        return Err(ApiError::Authorization(
            "Only the family admin can invite members".into(),
        ));
    }

    let email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| is_valid_email(e))
        .ok_or_else(|| ApiError::Validation("A valid email is required".into()))?;

    let token = Uuid::new_v4().simple().to_string();
    let expires_at = OffsetDateTime::now_utc() + INVITATION_TTL;
    let invitation =
        FamilyInvitation::issue(&state.db, family_id, &email, &token, expires_at).await?;

    // Mail delivery is an external concern; the token in the response is
    // what the invitee posts back to accept-invite.
    info!(family_id = %family_id, email = %email, "family invitation issued");
    Ok(response::ok_msg(
        &format!("Invitation sent to {email}"),
        InvitationData { invitation },
    ))
}

#[instrument(skip(state))]
pub async fn accept_invite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(token): Path<String>,
) -> Result<Json<Envelope<FamilyData>>, ApiError> {
    let invitation = FamilyInvitation::find_by_token(&state.db, &token)
        .await?
        .ok_or_else(|| ApiError::NotFound("Invitation not found".into()))?;
    if invitation.expires_at <= OffsetDateTime::now_utc() {
        return Err(ApiError::Validation("Invitation has expired".into()));
    }

    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;
    if !user.email.eq_ignore_ascii_case(&invitation.email) {
        return Err(ApiError::Authorization(
            "Invitation was issued for a different email".into(),
        ));
    }
    if Family::of_user(&state.db, user_id).await?.is_some() {
        return Err(ApiError::Validation(
            "Already a member of a family".into(),
        ));
    }

    let family = Family::find(&state.db, invitation.family_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Family not found".into()))?;
    invitation.accept(&state.db, user_id).await?;

    info!(user_id = %user_id, family_id = %family.id, "joined family");
    Ok(response::ok_msg(
        "You have joined the family group",
        FamilyData { family },
    ))
}

#[instrument(skip(state))]
pub async fn remove_member(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path((family_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let family = member_family(&state, family_id, user_id).await?;
    if family.admin_id != Some(user_id) {
        return Err(ApiError::Authorization(
            "Only the family admin can remove members".into(),
        ));
    }
    if member_id == user_id {
        return Err(ApiError::Validation(
            "Admins leave via the leave endpoint".into(),
        ));
    }

    let removed = Family::remove_member(&state.db, family_id, member_id).await?;
    if removed == 0 {
        return Err(ApiError::NotFound("Member not found".into()));
    }

    info!(family_id = %family_id, member_id = %member_id, "member removed from family");
    Ok(response::message_only("Member removed from family"))
}

#[instrument(skip(state))]
pub async fn leave_family(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(family_id): Path<Uuid>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let family = member_family(&state, family_id, user_id).await?;

    if family.admin_id == Some(user_id) {
        // Hand the admin role to the earliest-joined remaining member; the
        // last member leaving dissolves the family.
        match Family::earliest_member_excluding(&state.db, family_id, user_id).await? {
            Some(next_admin) => {
                Family::set_admin(&state.db, family_id, next_admin).await?;
                Family::remove_member(&state.db, family_id, user_id).await?;
                info!(family_id = %family_id, new_admin = %next_admin, "admin left, role handed off");
            }
            None => {
                Family::delete(&state.db, family_id).await?;
                info!(family_id = %family_id, "last member left, family deleted");
            }
        }
    } else {
        Family::remove_member(&state.db, family_id, user_id).await?;
        info!(family_id = %family_id, user_id = %user_id, "member left family");
    }

    Ok(response::message_only("You have left the family group"))
}
