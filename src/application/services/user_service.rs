//! User Service
//!
//! Back-office account management and password login.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::application::dto::UserDto;
use crate::domain::{User, UserRepository};
use crate::shared::error::AppError;
use crate::shared::snowflake::SnowflakeGenerator;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Create an account; the password is required and stored hashed.
    async fn register(&self, user: UserDto) -> Result<UserDto, AppError>;

    async fn get_user(&self, user_id: i64) -> Result<UserDto, AppError>;

    async fn get_user_by_email(&self, email: &str) -> Result<UserDto, AppError>;

    async fn list_users(&self) -> Result<Vec<UserDto>, AppError>;

    /// Replace an account; the stored hash is kept unless a new password is given.
    async fn update_user(&self, user_id: i64, user: UserDto) -> Result<UserDto, AppError>;

    async fn delete_user(&self, user_id: i64) -> Result<(), AppError>;

    /// Check credentials, returning the account on success.
    async fn authenticate(&self, email: &str, password: &str) -> Result<UserDto, AppError>;
}

/// UserService implementation
pub struct UserServiceImpl<U>
where
    U: UserRepository + ?Sized,
{
    user_repo: Arc<U>,
    id_generator: Arc<SnowflakeGenerator>,
}

impl<U> UserServiceImpl<U>
where
    U: UserRepository + ?Sized,
{
    pub fn new(user_repo: Arc<U>, id_generator: Arc<SnowflakeGenerator>) -> Self {
        Self {
            user_repo,
            id_generator,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    async fn find(&self, user_id: i64) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User", user_id))
    }
}

#[async_trait]
impl<U> UserService for UserServiceImpl<U>
where
    U: UserRepository + ?Sized + 'static,
{
    async fn register(&self, user: UserDto) -> Result<UserDto, AppError> {
        let password = user
            .password
            .as_deref()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| AppError::Validation("password: Password is required".into()))?;

        if self.user_repo.find_by_email(&user.email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".into()));
        }

        let password_hash = self.hash_password(password)?;

        let mut entity = User::from(user);
        if entity.id == 0 {
            entity.id = self.id_generator.generate();
        }
        entity.password = password_hash;

        let created = self.user_repo.create(&entity).await?;
        tracing::info!(user_id = created.id, role = %created.role, "User registered");

        Ok(UserDto::from(created))
    }

    async fn get_user(&self, user_id: i64) -> Result<UserDto, AppError> {
        self.find(user_id).await.map(UserDto::from)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<UserDto, AppError> {
        self.user_repo
            .find_by_email(email)
            .await?
            .map(UserDto::from)
            .ok_or_else(|| AppError::not_found("User", email))
    }

    async fn list_users(&self) -> Result<Vec<UserDto>, AppError> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(UserDto::from).collect())
    }

    async fn update_user(&self, user_id: i64, user: UserDto) -> Result<UserDto, AppError> {
        let existing = self.find(user_id).await?;

        let new_password = user.password.clone().filter(|p| !p.is_empty());
        let mut entity = User::from(user);
        entity.id = user_id;
        entity.password = match new_password {
            Some(password) => self.hash_password(&password)?,
            None => existing.password,
        };

        let updated = self.user_repo.update(&entity).await?;
        Ok(UserDto::from(updated))
    }

    async fn delete_user(&self, user_id: i64) -> Result<(), AppError> {
        self.user_repo.delete(user_id).await
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<UserDto, AppError> {
        let invalid = || AppError::Unauthorized("Invalid email or password".into());

        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(invalid)?;

        if !self.verify_password(password, &user.password)? {
            tracing::debug!(user_id = user.id, "Rejected login with wrong password");
            return Err(invalid());
        }

        Ok(UserDto::from(user))
    }
}
