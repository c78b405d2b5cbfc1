use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::access::{Role, RoleLookup};
use crate::features::profiles::models::Profile;
use crate::shared::constants::ROLE_STUDENT;

/// Profile fields captured at sign up
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: Uuid,
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<i32>,
}

/// Self-editable profile fields; `None` leaves the column unchanged
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub full_name: Option<String>,
    pub branch: Option<String>,
    pub semester: Option<i32>,
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Insert a student profile; an existing row for the same id is kept as is
    async fn create_student(&self, profile: NewProfile) -> Result<()>;

    async fn update_details(&self, id: Uuid, changes: ProfileChanges) -> Result<Option<Profile>>;

    async fn count(&self) -> Result<i64>;
}

pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const PROFILE_COLUMNS: &str = "id, email, full_name, branch, semester, role, created_at";

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn find(&self, id: Uuid) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get profile {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn create_student(&self, profile: NewProfile) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, email, full_name, branch, semester, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.branch)
        .bind(profile.semester)
        .bind(ROLE_STUDENT)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create profile {}: {:?}", profile.id, e);
            AppError::Database(e)
        })?;

        Ok(())
    }

    async fn update_details(&self, id: Uuid, changes: ProfileChanges) -> Result<Option<Profile>> {
        sqlx::query_as::<_, Profile>(&format!(
            r#"
            UPDATE profiles
            SET full_name = COALESCE($2, full_name),
                branch = COALESCE($3, branch),
                semester = COALESCE($4, semester)
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(&changes.full_name)
        .bind(&changes.branch)
        .bind(changes.semester)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update profile {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count profiles: {:?}", e);
                AppError::Database(e)
            })
    }
}

#[async_trait]
impl RoleLookup for PgProfileRepository {
    async fn role_of(&self, user_id: Uuid) -> Result<Option<Role>> {
        let role = sqlx::query_scalar::<_, String>("SELECT role FROM profiles WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(role.as_deref().and_then(Role::parse))
    }
}
