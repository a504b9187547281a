pub mod claims;
pub mod errors;
pub mod secret;
pub mod service;

pub use claims::TokenClaims;
pub use errors::TokenError;
pub use secret::TokenSecret;
pub use service::TokenService;
