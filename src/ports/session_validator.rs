//! Session validation port for access-token validation.
//!
//! Members sign in with the studio's external identity provider; this
//! service only checks the bearer tokens it issues. The port keeps HTTP
//! middleware independent of the token format.
//!
//! Implementations MUST validate:
//! - **Signature**: token was issued by the configured provider
//! - **Audience (aud)**: token is intended for this application
//! - **Expiry (exp)**: token is not expired

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// - `AuthError::InvalidToken` for malformed tokens or bad signatures
/// - `AuthError::TokenExpired` for expired tokens
/// - `AuthError::ServiceUnavailable` for transient errors
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a bearer token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
