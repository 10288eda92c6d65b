use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use time::{Duration, OffsetDateTime};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{
            AuthData, ForgotPasswordRequest, LoginRequest, PublicUser, RegisterRequest,
            ResetPasswordRequest, UserData, VerifyEmailRequest,
        },
        jwt::{AuthUser, JwtKeys},
        password::{hash_password, verify_password},
        repo::{NewUser, User},
    },
    error::ApiError,
    response::{self, Envelope},
    state::AppState,
};

const RESET_TOKEN_TTL: Duration = Duration::hours(1);

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/forgot-password", post(forgot_password))
        .route("/auth/reset-password", post(reset_password))
        .route("/auth/verify-email", post(verify_email))
        .route("/auth/me", get(get_me))
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<AuthData>>), ApiError> {
    let (Some(email), Some(password), Some(name)) =
        (payload.email, payload.password, payload.name)
    else {
        return Err(ApiError::Validation(
            "Email, password, and name are required".into(),
        ));
    };
    let email = email.trim().to_lowercase();
    let name = name.trim().to_string();

    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }
    if password.len() < 8 {
        warn!("password too short");
        return Err(ApiError::Validation("Password too short".into()));
    }
    if name.is_empty() {
        return Err(ApiError::Validation("Name must not be empty".into()));
    }

    if User::find_by_email(&state.db, &email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&password)?;
    let verification_token = Uuid::new_v4().simple().to_string();
    let user = User::register(
        &state.db,
        NewUser {
            email: &email,
            password_hash: &hash,
            name: &name,
            age: payload.age,
            height: payload.height,
            current_weight: payload.weight,
            coach_style: payload.coach_style.unwrap_or_default(),
            verification_token: &verification_token,
        },
    )
    .await?;

    // Delivery of the verification mail is an external concern; the token is
    // in place for POST /auth/verify-email once it arrives.
    info!(user_id = %user.id, email = %user.email, "user registered");

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    Ok(response::created(
        "User registered successfully",
        AuthData {
            user: user.into(),
            token,
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Envelope<AuthData>>, ApiError> {
    let (Some(email), Some(password)) = (payload.email, payload.password) else {
        return Err(ApiError::Validation(
            "Email and password are required".into(),
        ));
    };
    let email = email.trim().to_lowercase();

    let user = User::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| {
            warn!(email = %email, "login unknown email");
            ApiError::Authentication("Invalid credentials".into())
        })?;

    if !verify_password(&password, &user.password_hash)? {
        warn!(email = %email, user_id = %user.id, "login invalid password");
        return Err(ApiError::Authentication("Invalid credentials".into()));
    }

    let keys = JwtKeys::from_ref(&state);
    let token = keys.sign(user.id, &user.email)?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(response::ok_msg(
        "Login successful",
        AuthData {
            user: user.into(),
            token,
        },
    ))
}

#[instrument(skip(state, payload))]
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let email = payload.email.trim().to_lowercase();

    // Same response whether or not the account exists
    if let Some(user) = User::find_by_email(&state.db, &email).await? {
        let token = Uuid::new_v4().simple().to_string();
        let expires = OffsetDateTime::now_utc() + RESET_TOKEN_TTL;
        User::set_reset_token(&state.db, user.id, &token, expires).await?;
        info!(user_id = %user.id, "password reset token issued");
    }

    Ok(response::message_only(
        "If an account with that email exists, we have sent a password reset link.",
    ))
}

#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(payload): Json<ResetPasswordRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if payload.password.len() < 8 {
        return Err(ApiError::Validation("Password too short".into()));
    }

    let user = User::find_by_reset_token(&state.db, &payload.token)
        .await?
        .filter(|u| {
            u.password_reset_expires
                .map(|exp| exp > OffsetDateTime::now_utc())
                .unwrap_or(false)
        })
        .ok_or_else(|| ApiError::Validation("Invalid or expired reset token".into()))?;

    let hash = hash_password(&payload.password)?;
    User::update_password(&state.db, user.id, &hash).await?;

    info!(user_id = %user.id, "password reset");
    Ok(response::message_only("Password reset successful"))
}

#[instrument(skip(state, payload))]
pub async fn verify_email(
    State(state): State<AppState>,
    Json(payload): Json<VerifyEmailRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if payload.token.is_empty() {
        return Err(ApiError::Validation(
            "Verification token is required".into(),
        ));
    }

    if !User::verify_email(&state.db, &payload.token).await? {
        return Err(ApiError::Validation("Invalid verification token".into()));
    }

    Ok(response::message_only("Email verified successfully"))
}

#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Envelope<UserData>>, ApiError> {
    let user = User::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(response::ok(UserData {
        user: PublicUser::from(user),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("spaces in@example.com"));
        assert!(!is_valid_email("missing@tld"));
    }
}
