use async_trait::async_trait;

use crate::domain::identity::errors::IdentityError;
use crate::domain::user::models::PublicUser;

/// Port turning a raw `Authorization` header value into an authenticated user.
#[async_trait]
pub trait IdentityResolverPort: Send + Sync + 'static {
    /// Resolve the caller's identity.
    ///
    /// # Arguments
    /// * `authorization` - Raw header value, `None` when the header is absent
    ///
    /// # Returns
    /// Public view of the authenticated user
    ///
    /// # Errors
    /// * `MissingHeader` / `MalformedHeader` - Header absent or not `Bearer <token>`
    /// * `InvalidToken` / `InvalidSubject` - Token rejected by the token service
    /// * `UnknownUser` - Token names a user the store does not know
    /// * `Lookup` - Credential store failed
    async fn resolve(&self, authorization: Option<&str>) -> Result<PublicUser, IdentityError>;
}
