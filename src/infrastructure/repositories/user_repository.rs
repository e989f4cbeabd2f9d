//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::{User, UserRepository};
use crate::shared::error::{map_unique_violation, AppError};

/// Database row representation of the users table.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    role: String,
    email: String,
    password: String,
    img: Option<String>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: row.id,
            name: row.name,
            role: row.role.parse()?,
            email: row.email,
            password: row.password,
            img: row.img,
        })
    }
}

const USER_COLUMNS: &str = "id, name, role, email, password, img";

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?
        .map(User::try_from)
        .transpose()
    }

    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(User::try_from)
            .collect()
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, name, role, email, password, img)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.img)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User with this email already exists"))?;

        row.try_into()
    }

    async fn update(&self, user: &User) -> Result<User, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users
            SET name = $2, role = $3, email = $4, password = $5, img = $6
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.id)
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.img)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, "User with this email already exists"))?
        .ok_or_else(|| AppError::not_found("User", user.id))?;

        row.try_into()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("User", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRole;

    #[test]
    fn test_row_conversion_parses_role() {
        let row = UserRow {
            id: 1,
            name: "Ada".into(),
            role: "SUPPORT".into(),
            email: "ada@example.com".into(),
            password: "hash".into(),
            img: None,
        };
        let user = User::try_from(row).unwrap();
        assert_eq!(user.role, UserRole::Support);
    }

    #[test]
    fn test_row_conversion_rejects_unknown_role() {
        let row = UserRow {
            id: 1,
            name: "Ada".into(),
            role: "OWNER".into(),
            email: "ada@example.com".into(),
            password: "hash".into(),
            img: None,
        };
        assert!(matches!(
            User::try_from(row),
            Err(AppError::EnumValueNotFound { .. })
        ));
    }
}
