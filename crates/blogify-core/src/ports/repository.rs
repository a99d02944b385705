use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Notification, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite a stored entity. `RepoError::NotFound` if it does not exist.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Every post, newest first.
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments of a post without a parent, newest first.
    async fn find_top_level(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Direct replies to a comment, oldest first.
    async fn find_replies(&self, parent_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Delete the direct replies to a comment. Returns how many were removed.
    async fn delete_replies(&self, parent_id: Uuid) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait NotificationRepository: BaseRepository<Notification, Uuid> {
    /// A user's notifications, unread first, then newest first, at most `limit`.
    async fn list_for_user(&self, user_id: Uuid, limit: u64)
    -> Result<Vec<Notification>, RepoError>;

    /// Mark every unread notification of a user read. Returns how many changed.
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
