//! # Blogify Core
//!
//! The domain layer of the Blogify backend.
//! Entities, the rules that govern them, and the ports infrastructure must implement.
//! No database, HTTP, or crypto dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
