//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token validation and the auth extractors
//! - `request_id` - correlation id extraction

pub mod auth;
pub mod request_id;

pub use auth::{auth_middleware, AuthRejection, AuthState, OptionalAuth, RequireAuth};
pub use request_id::{CorrelationId, REQUEST_ID_HEADER};
