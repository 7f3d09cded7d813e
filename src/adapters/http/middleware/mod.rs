pub mod auth;

pub use auth::{AuthenticatedUser, OptionalAuth, RequestIdentity, RequireAuth};
