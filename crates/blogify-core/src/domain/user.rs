use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blank_fields;
use crate::error::DomainError;

/// User entity - a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(name: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Registration input after validation. The password is still plain text.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl NewUser {
    /// Validate raw registration fields.
    ///
    /// Every field is required; all missing ones are reported at once.
    pub fn validate(
        name: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, DomainError> {
        let missing = blank_fields(&[
            ("name", name.as_deref()),
            ("email", email.as_deref()),
            ("password", password.as_deref()),
        ]);
        let (name, email, password) = match (name, email, password) {
            (Some(n), Some(e), Some(p)) if missing.is_empty() => {
                (n.trim().to_string(), e.trim().to_string(), p)
            }
            _ => return Err(DomainError::MissingFields(missing)),
        };

        if !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".to_string()));
        }

        Ok(Self {
            name,
            email,
            password,
        })
    }
}
