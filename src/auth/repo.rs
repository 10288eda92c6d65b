use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Tone used by the coach message generator for this user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "coach_style", rename_all = "snake_case")]
pub enum CoachStyle {
    Encouraging,
    Motivating,
    Informative,
    Friendly,
}

impl Default for CoachStyle {
    fn default() -> Self {
        CoachStyle::Encouraging
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub coach_style: CoachStyle,
    pub email_verified: bool,
    #[serde(skip_serializing)]
    pub email_verification_token: Option<String>,
    #[serde(skip_serializing)]
    pub password_reset_token: Option<String>,
    #[serde(skip_serializing)]
    pub password_reset_expires: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub struct NewUser<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub current_weight: Option<f64>,
    pub coach_style: CoachStyle,
    pub verification_token: &'a str,
}

const USER_COLUMNS: &str = "id, email, password_hash, name, age, height, current_weight, \
     coach_style, email_verified, email_verification_token, password_reset_token, \
     password_reset_expires, created_at, updated_at";

impl User {
    pub async fn find_by_email(db: &PgPool, email: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Create the user together with default privacy settings in one
    /// transaction; privacy settings exist 1:1 with users from this point on.
    pub async fn register(db: &PgPool, new: NewUser<'_>) -> anyhow::Result<User> {
        let mut tx = db.begin().await?;

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users \
                 (email, password_hash, name, age, height, current_weight, coach_style, \
                  email_verification_token) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {USER_COLUMNS}"
        ))
        .bind(new.email)
        .bind(new.password_hash)
        .bind(new.name)
        .bind(new.age)
        .bind(new.height)
        .bind(new.current_weight)
        .bind(new.coach_style)
        .bind(new.verification_token)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO privacy_settings (user_id) VALUES ($1)")
            .bind(user.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(user)
    }

    pub async fn set_reset_token(
        db: &PgPool,
        user_id: Uuid,
        token: &str,
        expires: OffsetDateTime,
    ) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET password_reset_token = $2, password_reset_expires = $3, \
             updated_at = now() WHERE id = $1",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn find_by_reset_token(db: &PgPool, token: &str) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE password_reset_token = $1"
        ))
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(user)
    }

    /// Store a new password hash and clear any outstanding reset token.
    pub async fn update_password(db: &PgPool, user_id: Uuid, hash: &str) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET password_hash = $2, password_reset_token = NULL, \
             password_reset_expires = NULL, updated_at = now() WHERE id = $1",
        )
        .bind(user_id)
        .bind(hash)
        .execute(db)
        .await?;
        Ok(())
    }

    /// Flip `email_verified` for the user holding this verification token.
    /// Returns false when no user matches.
    pub async fn verify_email(db: &PgPool, token: &str) -> anyhow::Result<bool> {
        let result = sqlx::query(
            "UPDATE users SET email_verified = TRUE, email_verification_token = NULL, \
             updated_at = now() WHERE email_verification_token = $1",
        )
        .bind(token)
        .execute(db)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
