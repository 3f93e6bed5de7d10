//! Provider notification business logic.
//!
//! Rows are written by the weight-alert dispatcher and read back by
//! providers, newest first. The only mutation is the unread→read flip, which
//! is one-way and idempotent.

use crate::{
    entities::{Notification, notification, user},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Persists an in-app notification for a provider.
pub async fn create_notification(
    db: &DatabaseConnection,
    provider_id: i64,
    message: String,
) -> Result<notification::Model> {
    crate::core::users::require_role(db, provider_id, user::ROLE_PROVIDER).await?;

    let entry = notification::ActiveModel {
        provider_id: Set(provider_id),
        message: Set(message),
        created_at: Set(chrono::Utc::now()),
        is_read: Set(false),
        ..Default::default()
    };

    let result = entry.insert(db).await?;
    Ok(result)
}

/// All notifications for a provider, newest first.
pub async fn notifications_for_provider(
    db: &DatabaseConnection,
    provider_id: i64,
) -> Result<Vec<notification::Model>> {
    Notification::find()
        .filter(notification::Column::ProviderId.eq(provider_id))
        .order_by_desc(notification::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a notification as read. Re-marking an already-read notification
/// leaves it read and succeeds.
pub async fn mark_notification_read(
    db: &DatabaseConnection,
    notification_id: i64,
) -> Result<notification::Model> {
    let found = Notification::find_by_id(notification_id)
        .one(db)
        .await?
        .ok_or(Error::NotificationNotFound {
            id: notification_id,
        })?;

    if found.is_read {
        return Ok(found);
    }

    let mut active: notification::ActiveModel = found.into();
    active.is_read = Set(true);
    let updated = active.update(db).await?;
    Ok(updated)
}
