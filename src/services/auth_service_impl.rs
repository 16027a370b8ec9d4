//! `SeaORM` implementation of the `AuthService` trait.

use crate::api::types::UserDto;
use crate::config::SecurityConfig;
use crate::db::{Store, User};
use crate::services::auth_service::{AuthError, AuthService, MIN_PASSWORD_LEN};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(store: Store, security: SecurityConfig) -> Self {
        Self { store, security }
    }

    fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

fn user_dto(user: User) -> UserDto {
    UserDto {
        username: user.username,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn login(&self, username: &str, password: &str) -> Result<UserDto, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        if !self.store.verify_user_password(username, password).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let user = self
            .store
            .get_user_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        Ok(user_dto(user))
    }

    async fn list_users(&self) -> Result<Vec<UserDto>, AuthError> {
        let users = self.store.list_users().await?;
        Ok(users.into_iter().map(user_dto).collect())
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<UserDto, AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::Validation("Username is required".to_string()));
        }
        Self::validate_password(password)?;

        if self.store.get_user_by_username(username).await?.is_some() {
            return Err(AuthError::AlreadyExists(username.to_string()));
        }

        let user = self
            .store
            .create_user(username, password, &self.security)
            .await?;
        info!("Created user: {}", user.username);
        Ok(user_dto(user))
    }

    async fn delete_user(&self, acting: &str, target: &str) -> Result<(), AuthError> {
        if acting == target {
            return Err(AuthError::SelfDeletion);
        }

        if !self.store.delete_user(target).await? {
            return Err(AuthError::UserNotFound(target.to_string()));
        }

        info!(acting, "Deleted user: {target}");
        Ok(())
    }

    async fn reset_password(&self, username: &str, new_password: &str) -> Result<(), AuthError> {
        Self::validate_password(new_password)?;

        if self.store.get_user_by_username(username).await?.is_none() {
            return Err(AuthError::UserNotFound(username.to_string()));
        }

        self.store
            .update_user_password(username, new_password, &self.security)
            .await?;
        info!("Password reset for user: {username}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::temp_store;

    async fn service() -> SeaOrmAuthService {
        let store = temp_store().await;
        let security = SecurityConfig::default();
        store.ensure_bootstrap_user(&security).await.unwrap();
        SeaOrmAuthService::new(store, security)
    }

    #[tokio::test]
    async fn bootstrap_admin_can_log_in() {
        let service = service().await;
        let user = service.login("admin", "admin123").await.unwrap();
        assert_eq!(user.username, "admin");

        assert!(matches!(
            service.login("admin", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            service.login("ghost", "admin123").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn self_deletion_is_rejected() {
        let service = service().await;
        service.create_user("maria", "segredo123").await.unwrap();

        assert!(matches!(
            service.delete_user("admin", "admin").await,
            Err(AuthError::SelfDeletion)
        ));

        service.delete_user("admin", "maria").await.unwrap();
        let names: Vec<String> = service
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["admin".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_and_short_passwords_are_refused() {
        let service = service().await;
        assert!(matches!(
            service.create_user("admin", "whatever123").await,
            Err(AuthError::AlreadyExists(_))
        ));
        assert!(matches!(
            service.create_user("joao", "short").await,
            Err(AuthError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn reset_password_takes_effect() {
        let service = service().await;
        service.reset_password("admin", "novasenha1").await.unwrap();
        assert!(service.login("admin", "novasenha1").await.is_ok());
        assert!(service.login("admin", "admin123").await.is_err());
        assert!(matches!(
            service.reset_password("ghost", "novasenha1").await,
            Err(AuthError::UserNotFound(_))
        ));
    }
}
