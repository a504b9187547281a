use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::ports::IdentityResolverPort;
use crate::domain::user::models::PublicUser;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// Recovers the authenticated user behind a bearer token.
///
/// Stateless: the token proves who the caller was when it was issued, and
/// the credential store confirms that user still exists.
pub struct IdentityResolver<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> IdentityResolver<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

/// Extract the token from a `Bearer <token>` header value.
fn bearer_token(authorization: Option<&str>) -> Result<&str, IdentityError> {
    let header = authorization.ok_or(IdentityError::MissingHeader)?;

    let token = header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .ok_or(IdentityError::MalformedHeader)?;

    if token.is_empty() {
        return Err(IdentityError::MalformedHeader);
    }

    Ok(token)
}

#[async_trait]
impl<UR> IdentityResolverPort for IdentityResolver<UR>
where
    UR: UserRepository,
{
    async fn resolve(&self, authorization: Option<&str>) -> Result<PublicUser, IdentityError> {
        let token = bearer_token(authorization)?;

        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?;

        let user_id = UserId::from_string(&claims.id)
            .map_err(|e| IdentityError::InvalidSubject(e.to_string()))?;

        self.repository
            .find_by_id(&user_id)
            .await
            .map_err(|e| IdentityError::Lookup(e.to_string()))?
            .ok_or_else(|| IdentityError::UnknownUser(user_id.to_string()))
    }
}
