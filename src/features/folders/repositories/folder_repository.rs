use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::folders::models::Folder;

#[derive(Debug, Clone)]
pub struct NewFolder {
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub color: String,
    pub created_by: Uuid,
}

#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Every folder, ordered by name
    async fn list_all(&self) -> Result<Vec<Folder>>;

    async fn find(&self, id: Uuid) -> Result<Option<Folder>>;

    async fn insert(&self, folder: NewFolder) -> Result<Folder>;

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Folder>>;

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> Result<Option<Folder>>;

    /// Subfolders and resource links follow the foreign key rules
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgFolderRepository {
    pool: PgPool,
}

impl PgFolderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const FOLDER_COLUMNS: &str = "id, name, parent_id, color, created_by, created_at";

#[async_trait]
impl FolderRepository for PgFolderRepository {
    async fn list_all(&self) -> Result<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {} FROM folders ORDER BY name, created_at",
            FOLDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list folders: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, id: Uuid) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "SELECT {} FROM folders WHERE id = $1",
            FOLDER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get folder {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn insert(&self, folder: NewFolder) -> Result<Folder> {
        sqlx::query_as::<_, Folder>(&format!(
            r#"
            INSERT INTO folders (name, parent_id, color, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            FOLDER_COLUMNS
        ))
        .bind(&folder.name)
        .bind(folder.parent_id)
        .bind(&folder.color)
        .bind(folder.created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create folder: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn rename(&self, id: Uuid, name: &str) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET name = $2 WHERE id = $1 RETURNING {}",
            FOLDER_COLUMNS
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to rename folder {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> Result<Option<Folder>> {
        sqlx::query_as::<_, Folder>(&format!(
            "UPDATE folders SET parent_id = $2 WHERE id = $1 RETURNING {}",
            FOLDER_COLUMNS
        ))
        .bind(id)
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to move folder {}: {:?}", id, e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete folder {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
