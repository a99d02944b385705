//! Domain-to-wire conversions shared by the handlers.

use std::collections::HashMap;

use uuid::Uuid;

use blogify_core::domain::{Comment, Notification, Post, User};
use blogify_core::ports::UserRepository;
use blogify_shared::dto::{
    AuthorSummary, CommentResponse, NotificationResponse, PostResponse, UserResponse,
};

use crate::middleware::error::AppResult;

pub fn user_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
    }
}

pub fn post_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        summary: post.summary,
        author: post.author,
        content: post.content,
        image: post.image,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

pub fn notification_response(notification: Notification) -> NotificationResponse {
    NotificationResponse {
        id: notification.id,
        user_id: notification.user_id,
        kind: notification.kind.as_str().to_string(),
        message: notification.message,
        link: notification.link,
        is_read: notification.is_read,
        created_at: notification.created_at,
    }
}

/// Resolves comment authors, loading each account at most once.
pub struct AuthorDirectory<'a> {
    users: &'a dyn UserRepository,
    resolved: HashMap<Uuid, Option<AuthorSummary>>,
}

impl<'a> AuthorDirectory<'a> {
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self {
            users,
            resolved: HashMap::new(),
        }
    }

    /// `None` when the account no longer exists.
    pub async fn lookup(&mut self, user_id: Uuid) -> AppResult<Option<AuthorSummary>> {
        if let Some(author) = self.resolved.get(&user_id) {
            return Ok(author.clone());
        }

        let author = self.users.find_by_id(user_id).await?.map(|user| AuthorSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        });
        self.resolved.insert(user_id, author.clone());
        Ok(author)
    }

    /// The comment with its author populated.
    pub async fn comment(&mut self, comment: Comment) -> AppResult<CommentResponse> {
        let author = self.lookup(comment.author_id).await?;

        Ok(CommentResponse {
            id: comment.id,
            post_id: comment.post_id,
            author,
            content: comment.content,
            parent_comment: comment.parent_id,
            likes: comment.likes,
            is_edited: comment.is_edited,
            edited_at: comment.edited_at,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        })
    }
}
