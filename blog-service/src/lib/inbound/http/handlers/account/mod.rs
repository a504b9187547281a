use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::user::models::PublicUser;
use crate::domain::user::ports::AuthenticatedSession;

pub mod signin;
pub mod signup;
pub mod validate;

pub use signin::signin;
pub use signup::signup;
pub use validate::validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&PublicUser> for UserData {
    fn from(user: &PublicUser) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            status: user.status.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionResponseData {
    pub user: UserData,
    pub token: String,
}

impl From<&AuthenticatedSession> for SessionResponseData {
    fn from(session: &AuthenticatedSession) -> Self {
        Self {
            user: (&session.user).into(),
            token: session.token.clone(),
        }
    }
}
