pub mod auth;
pub mod cors;

pub use auth::{AuthContext, AuthMiddleware, auth_context};
pub use cors::create_cors;
