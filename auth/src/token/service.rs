use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::errors::TokenError;
use super::secret::TokenSecret;

/// Issues and verifies signed identity tokens (HS256).
///
/// Stateless: any instance built from the same secret verifies tokens issued
/// by any other.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    lifetime: Option<Duration>,
}

impl TokenService {
    /// Create a token service.
    ///
    /// # Arguments
    /// * `secret` - Validated signing secret
    /// * `lifetime` - Token lifetime; `None` issues tokens without expiry
    pub fn new(secret: &TokenSecret, lifetime: Option<Duration>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm: Algorithm::HS256,
            lifetime,
        }
    }

    /// Issue a token whose payload identifies `user_id`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, user_id: impl ToString) -> Result<String, TokenError> {
        let claims = TokenClaims::for_user(user_id, self.lifetime);

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Verify a token's signature and decode its payload.
    ///
    /// `exp` is enforced when present; tokens issued without it never expire.
    ///
    /// # Errors
    /// * `TokenExpired` - Token carries an `exp` in the past
    /// * `InvalidToken` - Signature mismatch, malformed or unparseable token
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::InvalidToken(e.to_string()),
            })
    }
}
