use chrono::Duration;

use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::token::TokenClaims;
use crate::token::TokenError;
use crate::token::TokenSecret;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token issuance.
///
/// Services hold one `Authenticator` behind an `Arc` and use it for every
/// credential operation, so the hashing policy and signing key live in one place.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
pub struct AuthenticationResult {
    /// Signed identity token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token error: {0}")]
    TokenError(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Validated token signing secret
    /// * `token_lifetime` - Lifetime of issued tokens; `None` for no expiry
    pub fn new(secret: &TokenSecret, token_lifetime: Option<Duration>) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secret, token_lifetime),
        }
    }

    /// Password hasher used by this authenticator.
    ///
    /// `PasswordHasher` is `Copy`, so callers can move it into a blocking task.
    pub fn password_hasher(&self) -> PasswordHasher {
        self.password_hasher
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `user_id`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match the stored hash
    /// * `TokenError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: impl ToString,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(user_id)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after signup, when the caller has just proven possession
    /// of the password by choosing it.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token generation failed
    pub fn issue_token(&self, user_id: impl ToString) -> Result<String, TokenError> {
        self.token_service.issue(user_id)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TokenExpired` / `InvalidToken` - Token validation or decoding failed
    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.token_service.verify(token)
    }
}
