pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  AdDetailedResponse, AdListItemResponse, AdResponse, CreateAdRequest, ErrorResponse,
  ImageResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
pub use errors::ApiError;
pub use middleware::{AuthenticatedUser, OptionalAuth, RequestIdentity, RequireAuth};
pub use routes::{configure_ad_routes, configure_auth_routes, configure_image_routes};
