use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ValidationErrors;
use crate::user::errors::EmailError;
use crate::user::errors::PasswordPolicyError;
use crate::user::errors::UserIdError;
use crate::user::errors::UserNameError;
use crate::user::errors::UserStatusError;

/// User aggregate entity.
///
/// Holds the password hash, so it only travels between the user service and
/// the credential store. Everything else sees [`PublicUser`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub password_hash: String,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Project the user without its password hash.
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Outward view of a user.
///
/// Has no password field at all, so no serializer or log line can leak one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicUser {
    pub id: UserId,
    pub name: UserName,
    pub email: EmailAddress,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Trimmed, at least 3 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    const MIN_LENGTH: usize = 3;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `TooShort` - Trimmed name shorter than 3 characters
    pub fn new(name: String) -> Result<Self, UserNameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length < Self::MIN_LENGTH {
            return Err(UserNameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validated with an RFC 5322 parser, trimmed and stored lowercase so that
/// uniqueness is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated, normalized email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password accepted at signup.
///
/// At least 6 characters with one uppercase letter and one digit. Never
/// stored; the user service hashes it and drops it.
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    /// * `MissingUppercase` - No uppercase letter
    /// * `MissingDigit` - No ASCII digit
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatus {
    #[default]
    Active,
    Disabled,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Disabled => "DISABLED",
        }
    }
}

impl FromStr for UserStatus {
    type Err = UserStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(UserStatus::Active),
            "DISABLED" => Ok(UserStatus::Disabled),
            other => Err(UserStatusError::Unknown(other.to_string())),
        }
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct SignupCommand {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: Password,
}

impl SignupCommand {
    /// Validate raw signup input.
    ///
    /// Every field is checked; all failures are reported together.
    ///
    /// # Errors
    /// * `ValidationErrors` - One entry per invalid field (`name`, `email`, `password`)
    pub fn new(name: String, email: String, password: String) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name = errors.check("name", UserName::new(name));
        let email = errors.check("email", EmailAddress::new(email));
        let password = errors.check("password", Password::new(password));

        match (name, email, password) {
            (Some(name), Some(email), Some(password)) => Ok(Self {
                name,
                email,
                password,
            }),
            _ => Err(errors),
        }
    }
}

/// Command to sign in with email and password
#[derive(Debug)]
pub struct SigninCommand {
    pub email: String,
    pub password: String,
}
