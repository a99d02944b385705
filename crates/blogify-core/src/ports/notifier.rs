//! Notification dispatch port.

use async_trait::async_trait;

use crate::domain::Notification;

/// Delivers notifications out of band.
///
/// Dispatch cannot fail from the caller's point of view: implementations log
/// and drop what they cannot store.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn dispatch(&self, notification: Notification);
}
