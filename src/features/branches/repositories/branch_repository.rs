use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::branches::models::Branch;

#[async_trait]
pub trait BranchRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Branch>>;

    /// Conflict when the name is taken
    async fn insert(&self, name: &str) -> Result<Branch>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgBranchRepository {
    pool: PgPool,
}

impl PgBranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BranchRepository for PgBranchRepository {
    async fn list(&self) -> Result<Vec<Branch>> {
        sqlx::query_as::<_, Branch>("SELECT id, name, created_at FROM branches ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list branches: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn insert(&self, name: &str) -> Result<Branch> {
        sqlx::query_as::<_, Branch>(
            "INSERT INTO branches (name) VALUES ($1) RETURNING id, name, created_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_db_unique(e, &format!("Branch '{}' already exists", name)))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM branches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete branch {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
