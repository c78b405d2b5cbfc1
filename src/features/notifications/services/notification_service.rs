use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::notifications::dtos::{CreateNotificationDto, NotificationResponseDto};
use crate::features::notifications::repositories::NotificationRepository;
use crate::shared::validation::non_blank;

pub struct NotificationService {
    notifications: Arc<dyn NotificationRepository>,
}

impl NotificationService {
    pub fn new(notifications: Arc<dyn NotificationRepository>) -> Self {
        Self { notifications }
    }

    pub async fn list(&self) -> Result<Vec<NotificationResponseDto>> {
        let notifications = self.notifications.list().await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    pub async fn create(
        &self,
        dto: CreateNotificationDto,
        user: &AuthenticatedUser,
    ) -> Result<NotificationResponseDto> {
        let message = non_blank(&dto.message)
            .ok_or_else(|| AppError::Validation("Message cannot be empty".to_string()))?;

        let notification = self
            .notifications
            .insert(message, dto.notification_type, user.id)
            .await?;

        tracing::info!(
            "Notification {} ({}) posted by {}",
            notification.id,
            notification.notification_type,
            user.id
        );
        Ok(notification.into())
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if !self.notifications.delete(id).await? {
            return Err(AppError::NotFound(format!("Notification {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::notifications::models::NotificationType;
    use crate::shared::test_helpers::{student_user, InMemoryNotifications};

    #[tokio::test]
    async fn test_create_records_author_and_lists_newest_first() {
        let service = NotificationService::new(Arc::new(InMemoryNotifications::default()));
        let admin = student_user();

        service
            .create(
                CreateNotificationDto {
                    message: "Mid-sem papers uploaded".to_string(),
                    notification_type: NotificationType::Info,
                },
                &admin,
            )
            .await
            .unwrap();
        let latest = service
            .create(
                CreateNotificationDto {
                    message: "  Server maintenance tonight ".to_string(),
                    notification_type: NotificationType::Warning,
                },
                &admin,
            )
            .await
            .unwrap();

        assert_eq!(latest.message, "Server maintenance tonight");
        assert_eq!(latest.notification_type, "warning");
        assert_eq!(latest.created_by, Some(admin.id));

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, latest.id);
    }

    #[tokio::test]
    async fn test_blank_message_and_missing_delete() {
        let service = NotificationService::new(Arc::new(InMemoryNotifications::default()));

        let blank = service
            .create(
                CreateNotificationDto {
                    message: " ".to_string(),
                    notification_type: NotificationType::Success,
                },
                &student_user(),
            )
            .await;
        assert!(matches!(blank, Err(AppError::Validation(_))));

        assert!(matches!(
            service.delete(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }
}
