use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Upper bound on comment length, in characters.
pub const MAX_COMMENT_LENGTH: usize = 1000;

/// Comment entity - a remark on a post, or a reply to a top-level remark.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub parent_id: Option<Uuid>,
    pub likes: Vec<Uuid>,
    pub is_edited: bool,
    pub edited_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Trim comment content and check it is non-empty and within bounds.
pub fn validate_comment_content(raw: Option<&str>) -> Result<String, DomainError> {
    let content = raw.map(str::trim).unwrap_or_default();

    if content.is_empty() {
        return Err(DomainError::Validation(
            "Comment content is required".to_string(),
        ));
    }
    if content.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::Validation(format!(
            "Comment content must be at most {MAX_COMMENT_LENGTH} characters"
        )));
    }

    Ok(content.to_string())
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, content: String, parent_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            content,
            parent_id,
            likes: Vec::new(),
            is_edited: false,
            edited_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author_id == user_id
    }

    /// Check that `self` can take a reply on `post_id`.
    ///
    /// Threads are one level deep: only top-level comments of the same post qualify.
    pub fn accepts_reply_on(&self, post_id: Uuid) -> Result<(), DomainError> {
        if self.post_id != post_id {
            return Err(DomainError::Validation(
                "Parent comment belongs to another post".to_string(),
            ));
        }
        if !self.is_top_level() {
            return Err(DomainError::Validation(
                "Replies cannot be nested".to_string(),
            ));
        }
        Ok(())
    }

    pub fn edit(&mut self, content: String) {
        let now = Utc::now();
        self.content = content;
        self.is_edited = true;
        self.edited_at = Some(now);
        self.updated_at = now;
    }

    /// Add or remove `user_id` from the likes. Returns the new membership.
    pub fn toggle_like(&mut self, user_id: Uuid) -> bool {
        let liked = if self.likes.contains(&user_id) {
            self.likes.retain(|id| *id != user_id);
            false
        } else {
            self.likes.push(user_id);
            true
        };
        self.updated_at = Utc::now();
        liked
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }
}
