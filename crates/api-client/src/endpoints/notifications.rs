//! Notification endpoints (require a session)

use crate::client::SafeSusClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{NotificationsResponse, SuccessResponse};

/// Notifications API interface
#[derive(Clone)]
pub struct NotificationsApi {
    client: SafeSusClient,
}

impl NotificationsApi {
    /// Create a new notifications API interface
    pub(crate) fn new(client: SafeSusClient) -> Self {
        Self { client }
    }

    /// List notifications for the signed-in user
    ///
    /// GET /notifications[?unreadOnly&limit]
    pub async fn list(
        &self,
        unread_only: Option<bool>,
        limit: Option<u32>,
    ) -> ApiResult<NotificationsResponse> {
        let mut query = Vec::new();
        if let Some(unread_only) = unread_only {
            query.push(("unreadOnly", unread_only.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.client.get(&["notifications"], &query).await
    }

    /// Mark one notification as read
    ///
    /// PATCH /notifications/{id}
    pub async fn mark_read(&self, id: i64) -> ApiResult<SuccessResponse> {
        if id <= 0 {
            return Err(ApiError::invalid_input("Invalid notification ID"));
        }
        let id = id.to_string();
        self.client.patch(&["notifications", id.as_str()]).await
    }

    /// Mark every notification as read
    ///
    /// POST /notifications/mark-all-read
    pub async fn mark_all_read(&self) -> ApiResult<SuccessResponse> {
        self.client
            .post(&["notifications", "mark-all-read"], Option::<&()>::None)
            .await
    }
}
