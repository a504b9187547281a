//! Authentication utilities library
//!
//! Provides the credential primitives for the blog backend:
//! - Password hashing (Argon2id, fixed cost)
//! - Signed identity tokens (HS256) carrying a user id
//! - Authentication coordination
//!
//! Nothing here performs I/O; user lookup belongs to the service that owns users.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("Abcdef1").unwrap();
//! assert!(hasher.verify("Abcdef1", &hash));
//! assert!(!hasher.verify("abcdef1", &hash));
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::{TokenSecret, TokenService};
//!
//! let secret = TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let service = TokenService::new(&secret, None);
//! let token = service.issue("user123").unwrap();
//! assert_eq!(service.verify(&token).unwrap().id, "user123");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenSecret};
//!
//! let secret = TokenSecret::new("secret_key_at_least_32_bytes_long!").unwrap();
//! let auth = Authenticator::new(&secret, None);
//!
//! // Signup: hash password
//! let hash = auth.hash_password("Abcdef1").unwrap();
//!
//! // Signin: verify and issue token
//! let result = auth.authenticate("Abcdef1", &hash, "user123").unwrap();
//!
//! // Every later request: validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.id, "user123");
//! ```

pub mod authenticator;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::TokenClaims;
pub use token::TokenError;
pub use token::TokenSecret;
pub use token::TokenService;
