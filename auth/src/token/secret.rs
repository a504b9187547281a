use std::fmt;

use super::errors::TokenError;

/// Process-wide signing secret for identity tokens.
///
/// Constructed once at startup from configuration. Construction fails when
/// the secret is blank or shorter than 256 bits, so a misconfigured service
/// never starts.
#[derive(Clone)]
pub struct TokenSecret(Vec<u8>);

impl TokenSecret {
    pub const MIN_LENGTH: usize = 32;

    /// Validate and wrap a signing secret.
    ///
    /// # Errors
    /// * `MissingSecret` - Secret is empty or whitespace only
    /// * `WeakSecret` - Secret is shorter than 32 bytes
    pub fn new(secret: impl Into<String>) -> Result<Self, TokenError> {
        let secret = secret.into();

        if secret.trim().is_empty() {
            return Err(TokenError::MissingSecret);
        }

        if secret.len() < Self::MIN_LENGTH {
            return Err(TokenError::WeakSecret {
                min: Self::MIN_LENGTH,
                actual: secret.len(),
            });
        }

        Ok(Self(secret.into_bytes()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(***)")
    }
}
