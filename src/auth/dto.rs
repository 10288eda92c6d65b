use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::auth::repo::{CoachStyle, User};

/// Request body for user registration. Required fields are optional here so
/// their absence surfaces as a field-level validation error, not a decode
/// failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub coach_style: Option<CoachStyle>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// User as returned to clients: no hash, no tokens.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub coach_style: CoachStyle,
    pub email_verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            age: user.age,
            height: user.height,
            current_weight: user.current_weight,
            coach_style: user.coach_style,
            email_verified: user.email_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: PublicUser,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "$argon2id$fake".into(),
            name: "Test".into(),
            age: None,
            height: None,
            current_weight: None,
            coach_style: CoachStyle::Encouraging,
            email_verified: false,
            email_verification_token: Some("secret-token".into()),
            password_reset_token: Some("reset-token".into()),
            password_reset_expires: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn public_user_has_null_optionals_and_no_secrets() {
        let json = serde_json::to_value(PublicUser::from(sample_user())).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert!(json["age"].is_null());
        assert!(json["height"].is_null());
        assert!(json["currentWeight"].is_null());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("emailVerificationToken").is_none());
        assert!(json.get("passwordResetToken").is_none());
    }

    #[test]
    fn coach_style_uses_snake_case_wire_form() {
        let json = serde_json::to_value(CoachStyle::Motivating).unwrap();
        assert_eq!(json, "motivating");
    }
}
