use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserStatus;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticatedSession;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }

    fn issue_session(&self, user: PublicUser) -> Result<AuthenticatedSession, UserError> {
        let token = self
            .authenticator
            .issue_token(user.id)
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthenticatedSession { user, token })
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, UserError> {
        let hasher = self.authenticator.password_hasher();
        let password = command.password;

        // Argon2 is CPU-bound; keep it off the async workers.
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(password.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(|e| UserError::Password(e.to_string()))?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            email: command.email,
            password_hash,
            status: UserStatus::Active,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User signed up");

        self.issue_session(created_user.to_public())
    }

    async fn signin(&self, command: SigninCommand) -> Result<AuthenticatedSession, UserError> {
        let email = EmailAddress::new(command.email).map_err(|_| UserError::InvalidCredentials)?;

        let user = self
            .repository
            .find_by_email(&email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash = user.password_hash.clone();
        let user_id = user.id;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(&password, &password_hash, user_id)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(authenticated) => {
                tracing::info!(user_id = %user.id, "User signed in");
                Ok(AuthenticatedSession {
                    user: user.to_public(),
                    token: authenticated.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, "Signin rejected: wrong password");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::TokenError(e)) => Err(UserError::Token(e.to_string())),
        }
    }
}
