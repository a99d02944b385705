//! Notification handlers. Callers only ever see their own notifications.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blogify_shared::dto::{NotificationResponse, ReadAllResponse};

use super::views::notification_response;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const LIST_LIMIT: u64 = 50;

/// GET /notifications
pub async fn list_notifications(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let notifications: Vec<NotificationResponse> = state
        .notifications
        .list_for_user(identity.user_id, LIST_LIMIT)
        .await?
        .into_iter()
        .map(notification_response)
        .collect();

    Ok(HttpResponse::Ok().json(notifications))
}

/// POST /notifications/{id}/read
pub async fn mark_read(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    // Another user's notification is indistinguishable from a missing one.
    let mut notification = state
        .notifications
        .find_by_id(path.into_inner())
        .await?
        .filter(|n| n.belongs_to(identity.user_id))
        .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

    notification.mark_read();
    let notification = state.notifications.update(notification).await?;

    Ok(HttpResponse::Ok().json(notification_response(notification)))
}

/// POST /notifications/read-all
pub async fn mark_all_read(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let updated = state.notifications.mark_all_read(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ReadAllResponse {
        message: "All read".to_string(),
        updated,
    }))
}
