//! Domain entities - the core business objects.

mod comment;
mod notification;
mod post;
mod user;

pub use comment::{Comment, MAX_COMMENT_LENGTH, validate_comment_content};
pub use notification::{Notification, NotificationKind};
pub use post::{Post, PostDraft};
pub use user::{NewUser, User};

/// Returns the names of the fields whose value is absent or blank.
pub(crate) fn blank_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<String> {
    fields
        .iter()
        .filter(|(_, value)| value.map(|v| v.trim().is_empty()).unwrap_or(true))
        .map(|(name, _)| name.to_string())
        .collect()
}
