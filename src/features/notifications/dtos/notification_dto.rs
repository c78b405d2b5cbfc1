use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::notifications::models::NotificationType;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub message: String,
    /// info, warning or success
    #[serde(rename = "type")]
    pub notification_type: String,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateNotificationDto {
    #[validate(length(max = 1000, message = "Message must not exceed 1000 characters"))]
    pub message: String,

    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_defaults_to_info() {
        let dto: CreateNotificationDto =
            serde_json::from_str(r#"{"message": "Exams moved"}"#).unwrap();
        assert_eq!(dto.notification_type, NotificationType::Info);

        let dto: CreateNotificationDto =
            serde_json::from_str(r#"{"message": "Done", "type": "success"}"#).unwrap();
        assert_eq!(dto.notification_type, NotificationType::Success);

        assert!(serde_json::from_str::<CreateNotificationDto>(
            r#"{"message": "x", "type": "danger"}"#
        )
        .is_err());
    }
}
