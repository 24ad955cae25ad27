//! Request correlation.
//!
//! `SetRequestIdLayer` stamps every request with `x-request-id`; command
//! handlers receive it as the correlation id of the events they publish.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::foundation::{CommandMetadata, UserId};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id taken from the request id header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId(pub Option<String>);

impl CorrelationId {
    /// Command metadata for a user acting within this request.
    pub fn metadata(&self, user_id: UserId) -> CommandMetadata {
        let metadata = CommandMetadata::new(user_id).with_source("api");
        match &self.0 {
            Some(id) => metadata.with_correlation_id(id.clone()),
            None => metadata,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);
        Ok(CorrelationId(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn extract(request: axum::http::Request<()>) -> CorrelationId {
        let (mut parts, _) = request.into_parts();
        CorrelationId::from_request_parts(&mut parts, &())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn reads_request_id_header() {
        let request = axum::http::Request::builder()
            .header(REQUEST_ID_HEADER, "req-42")
            .body(())
            .unwrap();
        let correlation = extract(request).await;
        let metadata = correlation.metadata(UserId::new("member-1").unwrap());
        assert_eq!(metadata.correlation_id_opt(), Some("req-42"));
        assert_eq!(metadata.source(), Some("api"));
    }

    #[tokio::test]
    async fn missing_header_leaves_correlation_unset() {
        let request = axum::http::Request::builder().body(()).unwrap();
        let correlation = extract(request).await;
        assert_eq!(correlation, CorrelationId(None));
        let metadata = correlation.metadata(UserId::new("member-1").unwrap());
        assert_eq!(metadata.correlation_id_opt(), None);
    }
}
