use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// User entity - an account able to own posts, likes and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Register a new user with generated ID and timestamps.
    ///
    /// The email address is lowercased as a whole before it is stored, and
    /// the username is derived from the local part of the address. Both must
    /// be unique; the store enforces that.
    pub fn register(
        email: &str,
        name: String,
        password_hash: String,
    ) -> Result<Self, DomainError> {
        let email = email.trim().to_lowercase();

        let Some((local, domain)) = email.split_once('@') else {
            return Err(DomainError::Validation(
                "email: enter a valid email address".to_string(),
            ));
        };
        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "email: enter a valid email address".to_string(),
            ));
        }
        let username = local.to_string();

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            email,
            username,
            name,
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_lowercases_whole_email() {
        let user = User::register("Test@Example.COM", String::new(), "hash".to_string()).unwrap();

        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.username, "test");
    }

    #[test]
    fn register_derives_username_from_local_part() {
        let user =
            User::register("some.body@example.com", String::new(), "hash".to_string()).unwrap();

        assert_eq!(user.username, "some.body");
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
    }

    #[test]
    fn register_rejects_address_without_at() {
        let result = User::register("not-an-email", String::new(), "hash".to_string());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn register_rejects_empty_local_part() {
        let result = User::register("@example.com", String::new(), "hash".to_string());

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
