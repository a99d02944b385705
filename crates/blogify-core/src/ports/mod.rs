//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod notifier;
mod repository;

pub use auth::{AuthError, PasswordService, TokenClaims, TokenService};
pub use media::{MediaError, MediaStorage, MediaUpload};
pub use notifier::Notifier;
pub use repository::{
    BaseRepository, CommentRepository, NotificationRepository, PostRepository, UserRepository,
};
