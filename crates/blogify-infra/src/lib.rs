//! # Blogify Infrastructure
//!
//! Concrete implementations of the ports defined in `blogify-core`:
//! repositories, token and password services, media relay, notification queue.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM.
//!   Without it only the in-memory repositories are compiled.

pub mod auth;
pub mod database;
pub mod media;
pub mod notifications;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
pub use media::{CloudinaryConfig, CloudinaryStorage, UnconfiguredStorage};
pub use notifications::{NotificationQueue, NotificationQueueConfig};
