//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::string_enum::string_enum;
use crate::shared::error::AppError;

string_enum! {
    /// Back-office role of a CRM user.
    pub enum UserRole {
        Admin => "ADMIN",
        Sales => "SALES",
        Marketing => "MARKETING",
        Support => "SUPPORT",
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Sales
    }
}

/// Represents a CRM operator account.
///
/// Maps to the `users` table:
/// - id: BIGINT PRIMARY KEY (Snowflake ID)
/// - name: VARCHAR(100) NOT NULL
/// - role: VARCHAR(20) NOT NULL
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password: VARCHAR(255) NOT NULL (Argon2 hash)
/// - img: TEXT NULL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Snowflake ID (primary key)
    pub id: i64,

    pub name: String,

    #[serde(default)]
    pub role: UserRole,

    /// Email address (unique)
    pub email: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password: String,

    /// Avatar image URL
    pub img: Option<String>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual database interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their Snowflake ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// All users, ordered by id.
    async fn find_all(&self) -> Result<Vec<User>, AppError>;

    /// Insert a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Replace an existing user.
    async fn update(&self, user: &User) -> Result<User, AppError>;

    /// Delete a user by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_str_is_case_insensitive() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("Marketing".parse::<UserRole>().unwrap(), UserRole::Marketing);
    }

    #[test]
    fn test_user_role_unknown_value() {
        let err = "janitor".parse::<UserRole>().unwrap_err();
        assert!(matches!(
            err,
            AppError::EnumValueNotFound { kind: "UserRole", .. }
        ));
    }

    #[test]
    fn test_password_is_not_serialized() {
        let user = User {
            id: 1,
            name: "Ada".into(),
            role: UserRole::Admin,
            email: "ada@example.com".into(),
            password: "$argon2id$secret".into(),
            img: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "ADMIN");
        assert!(user.is_admin());
    }
}
