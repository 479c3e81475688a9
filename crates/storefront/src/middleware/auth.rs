//! Bearer token extraction.
//!
//! The GraphQL endpoint serves signed-in and anonymous callers alike, so
//! the extractor never rejects. Resolvers that need a user validate the
//! token against the store.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The raw `Authorization` header value, if any.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(BearerToken(header): BearerToken) -> impl IntoResponse {
///     match header {
///         Some(_) => "signed in",
///         None => "anonymous",
///     }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BearerToken(pub Option<String>);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from);

        Ok(Self(header))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(header: Option<&str>) -> BearerToken {
        let mut builder = Request::builder().uri("/graphql");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        let (mut parts, ()) = builder.body(()).unwrap().into_parts();
        BearerToken::from_request_parts(&mut parts, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_reads_authorization_header() {
        assert_eq!(
            extract(Some("Bearer abc.def")).await,
            BearerToken(Some("Bearer abc.def".into()))
        );
        assert_eq!(extract(None).await, BearerToken(None));
        assert_eq!(extract(Some("   ")).await, BearerToken(None));
    }
}
