//! Application state - shared across all handlers.

use std::sync::Arc;

use blogify_core::ports::{
    CommentRepository, MediaStorage, NotificationRepository, Notifier, PasswordService,
    PostRepository, TokenService, UserRepository,
};
use blogify_infra::database::{
    InMemoryCommentRepository, InMemoryNotificationRepository, InMemoryPostRepository,
    InMemoryUserRepository,
};
use blogify_infra::{
    Argon2PasswordService, CloudinaryStorage, JwtTokenService, NotificationQueue,
    UnconfiguredStorage,
};

#[cfg(feature = "postgres")]
use blogify_infra::DatabaseConnections;
#[cfg(feature = "postgres")]
use blogify_infra::database::{
    PostgresCommentRepository, PostgresNotificationRepository, PostgresPostRepository,
    PostgresUserRepository,
};

use crate::config::AppConfig;

/// The four repositories, backed by one storage engine.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
}

impl Repositories {
    /// Process-local storage, lost on restart.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(db.clone())),
        }
    }
}

/// Values handlers read from configuration at request time.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: String,
    pub upload_requires_auth: bool,
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub notifier: Arc<dyn Notifier>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub media: Arc<dyn MediaStorage>,
    pub settings: Settings,
}

impl AppState {
    /// Wire services around `repos`. Spawns the notification worker, so it
    /// must run inside the Tokio runtime.
    pub fn build(config: &AppConfig, repos: Repositories) -> Self {
        let media: Arc<dyn MediaStorage> = match config.cloudinary.clone() {
            Some(cloudinary) => match CloudinaryStorage::new(cloudinary) {
                Ok(storage) => Arc::new(storage),
                Err(e) => {
                    tracing::warn!(error = %e, "Cloudinary client could not be built; uploads are disabled");
                    Arc::new(UnconfiguredStorage)
                }
            },
            None => {
                tracing::warn!("Cloudinary credentials not set; uploads are disabled");
                Arc::new(UnconfiguredStorage)
            }
        };

        let notifier = NotificationQueue::start(
            repos.notifications.clone(),
            config.notifications.clone(),
        );

        tracing::info!("Application state initialized");

        Self {
            users: repos.users,
            posts: repos.posts,
            comments: repos.comments,
            notifications: repos.notifications,
            notifier: Arc::new(notifier),
            tokens: Arc::new(JwtTokenService::new(config.jwt.clone())),
            passwords: Arc::new(Argon2PasswordService::new()),
            media,
            settings: Settings {
                environment: config.environment.clone(),
                upload_requires_auth: config.upload_requires_auth,
            },
        }
    }
}
