//! SeaORM entities, one table per domain entity.

pub mod comment;
pub mod notification;
pub mod post;
pub mod user;
