use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::notifications::models::{Notification, NotificationType};

#[async_trait]
pub trait NotificationRepository: Send + Sync {
    /// Newest first
    async fn list(&self) -> Result<Vec<Notification>>;

    async fn insert(
        &self,
        message: &str,
        notification_type: NotificationType,
        created_by: Uuid,
    ) -> Result<Notification>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

pub struct PgNotificationRepository {
    pool: PgPool,
}

impl PgNotificationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationRepository for PgNotificationRepository {
    async fn list(&self) -> Result<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, message, type, created_by, created_at
            FROM notifications
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list notifications: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn insert(
        &self,
        message: &str,
        notification_type: NotificationType,
        created_by: Uuid,
    ) -> Result<Notification> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (message, type, created_by)
            VALUES ($1, $2, $3)
            RETURNING id, message, type, created_by, created_at
            "#,
        )
        .bind(message)
        .bind(notification_type.as_str())
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create notification: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete notification {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
