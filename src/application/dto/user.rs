//! User DTOs and mapping.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{User, UserRole};

/// User as exchanged over REST. `password` is accepted but never echoed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    pub role: UserRole,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, skip_serializing)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub img: Option<String>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            name: user.name,
            role: user.role,
            email: user.email,
            password: Some(user.password),
            img: user.img,
        }
    }
}

impl From<UserDto> for User {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id.unwrap_or_default(),
            name: dto.name,
            role: dto.role,
            email: dto.email,
            password: dto.password.unwrap_or_default(),
            img: dto.img,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub password: String,
}

/// `?email=` lookup
#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round_trip_preserves_fields() {
        let user = User {
            id: 77,
            name: "Grace".into(),
            role: UserRole::Marketing,
            email: "grace@example.com".into(),
            password: "$argon2id$v=19$hash".into(),
            img: Some("https://cdn.example.com/grace.png".into()),
        };
        assert_eq!(User::from(UserDto::from(user.clone())), user);
    }

    #[test]
    fn test_password_write_only() {
        let dto: UserDto = serde_json::from_str(
            r#"{"name":"Ada","role":"ADMIN","email":"ada@example.com","password":"correct horse"}"#,
        )
        .unwrap();
        assert_eq!(dto.password.as_deref(), Some("correct horse"));
        assert_eq!(dto.id, None);

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("password").is_none());
    }
}
