//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Bearer-token validation settings for the external identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: Secret<String>,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub jwt_audience: String,

    /// Expected `iss` claim; not checked when unset
    #[serde(default)]
    pub jwt_issuer: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if production && secret.len() < MIN_PRODUCTION_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.jwt_audience.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_AUDIENCE"));
        }
        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: Secret::new(secret.to_string()),
            jwt_audience: default_audience(),
            jwt_issuer: None,
        }
    }

    #[test]
    fn test_empty_secret_is_rejected() {
        assert_eq!(
            config("").validate(false),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn test_short_secret_only_rejected_in_production() {
        assert!(config("dev-secret").validate(false).is_ok());
        assert_eq!(
            config("dev-secret").validate(true),
            Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN))
        );
    }

    #[test]
    fn test_debug_output_redacts_secret() {
        let printed = format!("{:?}", config("super-secret-value"));
        assert!(!printed.contains("super-secret-value"));
    }
}
