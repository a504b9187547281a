pub mod errors;
pub mod ports;
pub mod resolver;

pub use errors::IdentityError;
pub use ports::IdentityResolverPort;
pub use resolver::IdentityResolver;
