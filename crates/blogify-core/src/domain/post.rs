use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blank_fields;
use crate::error::DomainError;

/// Post entity - a blog article.
///
/// `author` holds the creator's user id as a raw string rather than a typed
/// reference; ownership checks compare it textually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub summary: String,
    pub author: String,
    pub content: String,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The client-editable part of a post, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: Option<String>,
}

impl PostDraft {
    /// Validate raw post fields. Title and content are required.
    pub fn validate(
        title: Option<String>,
        summary: Option<String>,
        content: Option<String>,
        image: Option<String>,
    ) -> Result<Self, DomainError> {
        let missing = blank_fields(&[("title", title.as_deref()), ("content", content.as_deref())]);

        match (title, content) {
            (Some(title), Some(content)) if missing.is_empty() => Ok(Self {
                title: title.trim().to_string(),
                summary: summary.unwrap_or_default(),
                content,
                image: image.filter(|url| !url.trim().is_empty()),
            }),
            _ => Err(DomainError::MissingFields(missing)),
        }
    }
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: Uuid, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            summary: draft.summary,
            author: author_id.to_string(),
            content: draft.content,
            image: draft.image,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author == user_id.to_string()
    }

    /// Replace every editable field. Author and creation time are kept.
    pub fn replace(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.summary = draft.summary;
        self.content = draft.content;
        self.image = draft.image;
        self.updated_at = Utc::now();
    }
}
