use async_trait::async_trait;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::SigninCommand;
use crate::domain::user::models::SignupCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// A user together with a freshly issued identity token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: PublicUser,
    pub token: String,
}

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a new user and issue a token for it.
    ///
    /// # Arguments
    /// * `command` - Validated command containing name, email and password
    ///
    /// # Returns
    /// Public view of the created user and its token
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Normalized email is already registered
    /// * `Password` - Hashing failed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<AuthenticatedSession, UserError>;

    /// Verify credentials and issue a token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `DatabaseError` - Database operation failed
    async fn signin(&self, command: SigninCommand) -> Result<AuthenticatedSession, UserError>;
}

/// Persistence operations for the user aggregate (the credential store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// Email uniqueness is enforced atomically by the store.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve a user, including its password hash, by normalized email.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError>;

    /// Retrieve the public projection of a user by identifier.
    ///
    /// The password hash is never read for this query.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<PublicUser>, UserError>;
}
