use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Comment, Post};

/// What triggered a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Comment,
    Like,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Like => "like",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity - tells a user someone interacted with their content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub message: String,
    pub link: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, kind: NotificationKind, message: String, link: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            message,
            link,
            is_read: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Notification for the author of `post` that `actor` commented on it.
    ///
    /// `None` when the actor wrote the post, or when the stored author is not a user id.
    pub fn commented(post: &Post, actor_id: Uuid, actor_name: &str) -> Option<Self> {
        if post.is_authored_by(actor_id) {
            return None;
        }
        let recipient = Uuid::parse_str(&post.author).ok()?;

        Some(Self::new(
            recipient,
            NotificationKind::Comment,
            format!("{actor_name} commented on your post"),
            format!("/post/{}", post.id),
        ))
    }

    /// Notification for the author of `comment` that `actor` liked it.
    pub fn liked(comment: &Comment, actor_id: Uuid, actor_name: &str) -> Option<Self> {
        if comment.is_authored_by(actor_id) {
            return None;
        }

        Some(Self::new(
            comment.author_id,
            NotificationKind::Like,
            format!("{actor_name} liked your comment"),
            format!("/post/{}#comment-{}", comment.post_id, comment.id),
        ))
    }

    pub fn belongs_to(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostDraft;

    fn post_by(author: Uuid) -> Post {
        let draft = PostDraft::validate(Some("T".into()), None, Some("C".into()), None).unwrap();
        Post::new(author, draft)
    }

    #[test]
    fn test_comment_notification_targets_post_author() {
        let author = Uuid::new_v4();
        let post = post_by(author);

        let note = Notification::commented(&post, Uuid::new_v4(), "Bob").unwrap();

        assert_eq!(note.user_id, author);
        assert_eq!(note.kind, NotificationKind::Comment);
        assert_eq!(note.message, "Bob commented on your post");
        assert_eq!(note.link, format!("/post/{}", post.id));
        assert!(!note.is_read);
    }

    #[test]
    fn test_no_notification_on_own_post() {
        let author = Uuid::new_v4();
        assert!(Notification::commented(&post_by(author), author, "Alice").is_none());
    }

    #[test]
    fn test_like_notification_links_to_comment() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "hi".into(), None);

        let note = Notification::liked(&comment, Uuid::new_v4(), "Bob").unwrap();

        assert_eq!(note.user_id, comment.author_id);
        assert_eq!(note.message, "Bob liked your comment");
        assert_eq!(
            note.link,
            format!("/post/{}#comment-{}", comment.post_id, comment.id)
        );
        assert!(Notification::liked(&comment, comment.author_id, "Self").is_none());
    }
}
