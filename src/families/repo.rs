use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Family {
    pub id: Uuid,
    pub name: String,
    pub admin_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Roster entry: membership joined with the member's user row.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FamilyInvitation {
    pub id: Uuid,
    pub family_id: Uuid,
    pub email: String,
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Family {
    /// Create a family with the creator as admin and first member.
    pub async fn create(db: &PgPool, name: &str, admin_id: Uuid) -> anyhow::Result<Family> {
        let mut tx = db.begin().await?;
        let family = sqlx::query_as::<_, Family>(
            "INSERT INTO families (name, admin_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(admin_id)
        .fetch_one(&mut *tx)
        .await?;
        sqlx::query("INSERT INTO family_members (family_id, user_id) VALUES ($1, $2)")
            .bind(family.id)
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(family)
    }

    pub async fn find(db: &PgPool, id: Uuid) -> anyhow::Result<Option<Family>> {
        let family = sqlx::query_as::<_, Family>("SELECT * FROM families WHERE id = $1")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(family)
    }

    /// The family the user currently belongs to, if any (membership is
    /// unique per user).
    pub async fn of_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<Family>> {
        let family = sqlx::query_as::<_, Family>(
            "SELECT f.* FROM families f \
             JOIN family_members m ON m.family_id = f.id \
             WHERE m.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(family)
    }

    pub async fn members(db: &PgPool, family_id: Uuid) -> anyhow::Result<Vec<MemberProfile>> {
        let members = sqlx::query_as::<_, MemberProfile>(
            "SELECT m.user_id, u.name, u.email, m.joined_at \
             FROM family_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.family_id = $1 \
             ORDER BY m.joined_at ASC",
        )
        .bind(family_id)
        .fetch_all(db)
        .await?;
        Ok(members)
    }

    pub async fn is_member(db: &PgPool, family_id: Uuid, user_id: Uuid) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM family_members WHERE family_id = $1 AND user_id = $2)",
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_one(db)
        .await?;
        Ok(exists)
    }

    pub async fn remove_member(
        db: &PgPool,
        family_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<u64> {
        let result =
            sqlx::query("DELETE FROM family_members WHERE family_id = $1 AND user_id = $2")
                .bind(family_id)
                .bind(user_id)
                .execute(db)
                .await?;
        Ok(result.rows_affected())
    }

    /// Earliest-joined member other than the given user; used for admin
    /// hand-off when the admin leaves.
    pub async fn earliest_member_excluding(
        db: &PgPool,
        family_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Uuid>> {
        let next = sqlx::query_scalar::<_, Uuid>(
            "SELECT user_id FROM family_members \
             WHERE family_id = $1 AND user_id <> $2 \
             ORDER BY joined_at ASC LIMIT 1",
        )
        .bind(family_id)
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(next)
    }

    pub async fn set_admin(
        db: &PgPool,
        family_id: Uuid,
        admin_id: Uuid,
    ) -> anyhow::Result<()> {
        sqlx::query("UPDATE families SET admin_id = $2, updated_at = now() WHERE id = $1")
            .bind(family_id)
            .bind(admin_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn delete(db: &PgPool, family_id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM families WHERE id = $1")
            .bind(family_id)
            .execute(db)
            .await?;
        Ok(())
    }
}

impl FamilyInvitation {
    /// Issue an invitation; a pending invitation for the same email in the
    /// same family is replaced.
    pub async fn issue(
        db: &PgPool,
        family_id: Uuid,
        email: &str,
        token: &str,
        expires_at: OffsetDateTime,
    ) -> anyhow::Result<FamilyInvitation> {
        let mut tx = db.begin().await?;
        sqlx::query("DELETE FROM family_invitations WHERE family_id = $1 AND email = $2")
            .bind(family_id)
            .bind(email)
            .execute(&mut *tx)
            .await?;
        let invitation = sqlx::query_as::<_, FamilyInvitation>(
            "INSERT INTO family_invitations (family_id, email, token, expires_at) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(family_id)
        .bind(email)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(invitation)
    }

    pub async fn find_by_token(
        db: &PgPool,
        token: &str,
    ) -> anyhow::Result<Option<FamilyInvitation>> {
        let invitation = sqlx::query_as::<_, FamilyInvitation>(
            "SELECT * FROM family_invitations WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(db)
        .await?;
        Ok(invitation)
    }

    /// Consume the invitation: add the user as a member and drop the token.
    pub async fn accept(&self, db: &PgPool, user_id: Uuid) -> anyhow::Result<()> {
        let mut tx = db.begin().await?;
        sqlx::query("INSERT INTO family_members (family_id, user_id) VALUES ($1, $2)")
            .bind(self.family_id)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM family_invitations WHERE id = $1")
            .bind(self.id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}
