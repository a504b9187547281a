use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Identity token payload.
///
/// Carries only the user identifier. `exp` is present only when the issuing
/// service was configured with a lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// User identifier
    pub id: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Build claims for a user, issued now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `lifetime` - Optional token lifetime; `None` issues a token without `exp`
    pub fn for_user(user_id: impl ToString, lifetime: Option<Duration>) -> Self {
        let now = Utc::now();

        Self {
            id: user_id.to_string(),
            iat: now.timestamp(),
            exp: lifetime.map(|lifetime| (now + lifetime).timestamp()),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.is_some_and(|exp| exp < current_timestamp)
    }
}
