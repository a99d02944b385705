//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogify_core::domain::{Comment, Notification, Post, User};
use blogify_core::error::RepoError;
use blogify_core::ports::{
    BaseRepository, CommentRepository, NotificationRepository, PostRepository, UserRepository,
};

/// An entity the in-memory store can hold.
pub trait Stored: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;

    /// Mirrors a unique constraint: two records that conflict cannot coexist.
    fn conflicts_with(&self, _other: &Self) -> bool {
        false
    }
}

impl Stored for User {
    fn id(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.id != other.id && self.email == other.email
    }
}

impl Stored for Post {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Stored for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Stored for Notification {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// HashMap-backed repository behind an async RwLock.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Stored> InMemoryRepository<T> {
    /// Clone out every record matching `predicate`.
    async fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        let store = self.store.read().await;
        store.values().filter(|e| predicate(e)).cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }
}

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;
pub type InMemoryNotificationRepository = InMemoryRepository<Notification>;

#[async_trait]
impl<T: Stored> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        if store.contains_key(&entity.id()) || store.values().any(|e| e.conflicts_with(&entity)) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;

        if !store.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        if store.values().any(|e| e.conflicts_with(&entity)) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }

        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.store.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.select(|u| u.email == email).await.into_iter().next())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_recent(&self) -> Result<Vec<Post>, RepoError> {
        let mut posts = self.select(|_| true).await;
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_top_level(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut comments = self
            .select(|c| c.post_id == post_id && c.parent_id.is_none())
            .await;
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn find_replies(&self, parent_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let mut replies = self.select(|c| c.parent_id == Some(parent_id)).await;
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(replies)
    }

    async fn delete_replies(&self, parent_id: Uuid) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|_, c| c.parent_id != Some(parent_id));
        Ok((before - store.len()) as u64)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
        limit: u64,
    ) -> Result<Vec<Notification>, RepoError> {
        let mut notes = self.select(|n| n.user_id == user_id).await;
        notes.sort_by(|a, b| {
            a.is_read
                .cmp(&b.is_read)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        notes.truncate(limit as usize);
        Ok(notes)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut store = self.store.write().await;
        let now = Utc::now();
        let mut updated = 0;

        for note in store
            .values_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            note.is_read = true;
            note.updated_at = now;
            updated += 1;
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogify_core::domain::{NotificationKind, PostDraft};

    fn draft(title: &str) -> PostDraft {
        PostDraft::validate(Some(title.into()), None, Some("body".into()), None).unwrap()
    }

    #[tokio::test]
    async fn test_duplicate_email_is_a_constraint_violation() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("A".into(), "a@x.com".into(), "h".into()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("B".into(), "a@x.com".into(), "h".into()))
            .await;

        assert!(matches!(result, Err(RepoError::Constraint(_))));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing_entity_is_not_found() {
        let repo = InMemoryPostRepository::new();

        let result = repo.update(Post::new(Uuid::new_v4(), draft("ghost"))).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_posts_are_listed_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();

        let mut older = Post::new(author, draft("older"));
        older.created_at = Utc::now() - chrono::TimeDelta::minutes(5);
        repo.insert(older).await.unwrap();
        repo.insert(Post::new(author, draft("newer"))).await.unwrap();

        let titles: Vec<_> = repo
            .list_recent()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["newer", "older"]);
    }

    #[tokio::test]
    async fn test_delete_replies_only_touches_direct_children() {
        let repo = InMemoryCommentRepository::new();
        let post = Uuid::new_v4();
        let author = Uuid::new_v4();

        let parent = repo
            .insert(Comment::new(post, author, "parent".into(), None))
            .await
            .unwrap();
        let other = repo
            .insert(Comment::new(post, author, "other".into(), None))
            .await
            .unwrap();
        repo.insert(Comment::new(post, author, "r1".into(), Some(parent.id)))
            .await
            .unwrap();
        repo.insert(Comment::new(post, author, "r2".into(), Some(parent.id)))
            .await
            .unwrap();
        let kept = repo
            .insert(Comment::new(post, author, "r3".into(), Some(other.id)))
            .await
            .unwrap();

        assert_eq!(repo.delete_replies(parent.id).await.unwrap(), 2);
        assert_eq!(repo.len().await, 3);
        assert!(repo.find_by_id(kept.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_unread_notifications_come_first() {
        let repo = InMemoryNotificationRepository::new();
        let user = Uuid::new_v4();

        let mut read = Notification::new(user, NotificationKind::Like, "old".into(), "/".into());
        read.mark_read();
        repo.insert(read).await.unwrap();
        let mut stale = Notification::new(user, NotificationKind::Comment, "stale".into(), "/".into());
        stale.created_at = Utc::now() - chrono::TimeDelta::hours(1);
        repo.insert(stale).await.unwrap();
        repo.insert(Notification::new(user, NotificationKind::Comment, "fresh".into(), "/".into()))
            .await
            .unwrap();
        repo.insert(Notification::new(
            Uuid::new_v4(),
            NotificationKind::Comment,
            "someone else".into(),
            "/".into(),
        ))
        .await
        .unwrap();

        let messages: Vec<_> = repo
            .list_for_user(user, 50)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["fresh", "stale", "old"]);

        assert_eq!(repo.list_for_user(user, 2).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mark_all_read_is_scoped_to_user() {
        let repo = InMemoryNotificationRepository::new();
        let (me, them) = (Uuid::new_v4(), Uuid::new_v4());

        for user in [me, me, them] {
            repo.insert(Notification::new(user, NotificationKind::Like, "m".into(), "/".into()))
                .await
                .unwrap();
        }

        assert_eq!(repo.mark_all_read(me).await.unwrap(), 2);
        assert_eq!(repo.mark_all_read(me).await.unwrap(), 0);
        assert!(repo.list_for_user(them, 50).await.unwrap().iter().all(|n| !n.is_read));
    }
}
