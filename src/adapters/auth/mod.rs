//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `JwtSessionValidator` - HS256 tokens from the identity provider
//! - `MockSessionValidator` - fixed tokens for tests and local runs

mod jwt;
mod mock;

pub use jwt::JwtSessionValidator;
pub use mock::MockSessionValidator;
