//! Bounded in-process queue that writes notifications in the background.
//!
//! Handlers enqueue and move on. A failed write is retried with a linear
//! backoff, then logged and dropped. Queued notifications are lost on restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use blogify_core::domain::Notification;
use blogify_core::ports::{NotificationRepository, Notifier};

#[derive(Debug, Clone)]
pub struct NotificationQueueConfig {
    /// Capacity of the queue; events beyond it are dropped.
    pub capacity: usize,
    /// Write attempts per notification, including the first.
    pub max_attempts: u32,
    /// Delay unit between attempts; attempt `n` waits `n * retry_backoff`.
    pub retry_backoff: Duration,
}

impl Default for NotificationQueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1000,
            max_attempts: 3,
            retry_backoff: Duration::from_millis(100),
        }
    }
}

struct Delivery {
    notification: Notification,
    attempts: u32,
}

#[derive(Default)]
struct Counters {
    delivered: AtomicUsize,
    failed: AtomicUsize,
    dropped: AtomicUsize,
}

/// Snapshot of queue counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
    pub dropped: usize,
}

pub struct NotificationQueue {
    sender: mpsc::Sender<Delivery>,
    counters: Arc<Counters>,
}

impl NotificationQueue {
    /// Create the queue and spawn its worker on the current Tokio runtime.
    pub fn start(repo: Arc<dyn NotificationRepository>, config: NotificationQueueConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.capacity.max(1));
        let counters = Arc::new(Counters::default());

        tokio::spawn(run_worker(
            receiver,
            sender.downgrade(),
            repo,
            counters.clone(),
            config,
        ));

        Self { sender, counters }
    }

    pub fn stats(&self) -> DispatchStats {
        DispatchStats {
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

#[async_trait]
impl Notifier for NotificationQueue {
    async fn dispatch(&self, notification: Notification) {
        let delivery = Delivery {
            notification,
            attempts: 0,
        };

        if let Err(e) = self.sender.try_send(delivery) {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            let reason = match e {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "queue closed",
            };
            tracing::warn!(reason, "Dropping notification");
        }
    }
}

async fn run_worker(
    mut receiver: mpsc::Receiver<Delivery>,
    retry_sender: mpsc::WeakSender<Delivery>,
    repo: Arc<dyn NotificationRepository>,
    counters: Arc<Counters>,
    config: NotificationQueueConfig,
) {
    tracing::info!("Notification worker started");

    while let Some(mut delivery) = receiver.recv().await {
        delivery.attempts += 1;
        let id = delivery.notification.id;

        match repo.insert(delivery.notification.clone()).await {
            Ok(_) => {
                counters.delivered.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    notification_id = %id,
                    recipient = %delivery.notification.user_id,
                    kind = %delivery.notification.kind,
                    "Notification stored"
                );
            }
            Err(e) if delivery.attempts < config.max_attempts => {
                tracing::warn!(
                    notification_id = %id,
                    attempt = delivery.attempts,
                    max_attempts = config.max_attempts,
                    error = %e,
                    "Notification write failed, will retry"
                );
                let Some(sender) = retry_sender.upgrade() else {
                    counters.failed.fetch_add(1, Ordering::Relaxed);
                    continue;
                };
                let delay = config.retry_backoff * delivery.attempts;
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    if sender.send(delivery).await.is_err() {
                        tracing::error!(notification_id = %id, "Failed to re-enqueue notification");
                    }
                });
            }
            Err(e) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::error!(
                    notification_id = %id,
                    attempts = delivery.attempts,
                    error = %e,
                    "Notification dropped after max retries"
                );
            }
        }
    }

    tracing::info!("Notification worker shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    use uuid::Uuid;

    use blogify_core::domain::NotificationKind;
    use blogify_core::error::RepoError;
    use blogify_core::ports::BaseRepository;

    use crate::database::InMemoryNotificationRepository;

    fn note(user_id: Uuid) -> Notification {
        Notification::new(
            user_id,
            NotificationKind::Comment,
            "Bob commented on your post".into(),
            "/post/1".into(),
        )
    }

    fn fast_config() -> NotificationQueueConfig {
        NotificationQueueConfig {
            retry_backoff: Duration::from_millis(1),
            ..Default::default()
        }
    }

    async fn wait_until(queue: &NotificationQueue, done: impl Fn(DispatchStats) -> bool) {
        for _ in 0..200 {
            if done(queue.stats()) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("queue did not settle: {:?}", queue.stats());
    }

    /// Fails the first `failures` inserts, then delegates.
    struct FlakyRepository {
        inner: InMemoryNotificationRepository,
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl BaseRepository<Notification, Uuid> for FlakyRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Notification>, RepoError> {
            self.inner.find_by_id(id).await
        }

        async fn insert(&self, entity: Notification) -> Result<Notification, RepoError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) < self.failures {
                return Err(RepoError::Connection("database unavailable".into()));
            }
            self.inner.insert(entity).await
        }

        async fn update(&self, entity: Notification) -> Result<Notification, RepoError> {
            self.inner.update(entity).await
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
            self.inner.delete(id).await
        }
    }

    #[async_trait]
    impl NotificationRepository for FlakyRepository {
        async fn list_for_user(
            &self,
            user_id: Uuid,
            limit: u64,
        ) -> Result<Vec<Notification>, RepoError> {
            self.inner.list_for_user(user_id, limit).await
        }

        async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepoError> {
            self.inner.mark_all_read(user_id).await
        }
    }

    #[tokio::test]
    async fn test_dispatch_stores_notification() {
        let repo = Arc::new(InMemoryNotificationRepository::new());
        let queue = NotificationQueue::start(repo.clone(), fast_config());
        let user = Uuid::new_v4();

        queue.dispatch(note(user)).await;
        wait_until(&queue, |s| s.delivered == 1).await;

        assert_eq!(repo.list_for_user(user, 50).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let repo = Arc::new(FlakyRepository {
            inner: InMemoryNotificationRepository::new(),
            failures: 2,
            calls: AtomicU32::new(0),
        });
        let queue = NotificationQueue::start(repo.clone(), fast_config());
        let user = Uuid::new_v4();

        queue.dispatch(note(user)).await;
        wait_until(&queue, |s| s.delivered == 1).await;

        assert_eq!(repo.calls.load(Ordering::SeqCst), 3);
        assert_eq!(queue.stats().failed, 0);
    }

    #[tokio::test]
    async fn test_persistent_failure_is_dropped() {
        let repo = Arc::new(FlakyRepository {
            inner: InMemoryNotificationRepository::new(),
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let queue = NotificationQueue::start(repo.clone(), fast_config());

        queue.dispatch(note(Uuid::new_v4())).await;
        wait_until(&queue, |s| s.failed == 1).await;

        assert_eq!(repo.calls.load(Ordering::SeqCst), 3);
        assert_eq!(queue.stats().delivered, 0);
    }
}
