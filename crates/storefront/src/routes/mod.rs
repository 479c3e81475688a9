//! HTTP routes for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health   - Liveness check
//! GET  /graphql  - GraphiQL explorer
//! POST /graphql  - GraphQL endpoint
//! ```

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::State,
    http::Request,
    response::{Html, IntoResponse},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::Span;

use crate::graphql::{WellnestSchema, build_schema};
use crate::middleware::{BearerToken, request_id_middleware};
use crate::state::AppState;

/// Path of the GraphQL endpoint.
pub const GRAPHQL_PATH: &str = "/graphql";

/// Build the full application router over `state`.
///
/// Used by the binary and by integration tests, which serve it on an
/// ephemeral port.
pub fn app(state: AppState) -> Router {
    let schema = build_schema(state);

    Router::new()
        .route("/health", get(health))
        .route(GRAPHQL_PATH, get(graphiql).post(graphql_handler))
        .with_state(schema)
        .layer(cors_layer())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_span::<axum::body::Body>))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn graphql_handler(
    State(schema): State<WellnestSchema>,
    token: BearerToken,
    request: GraphQLRequest,
) -> GraphQLResponse {
    let request = request.into_inner().data(token);
    schema.execute(request).await.into()
}

/// Request span with an empty `request_id` slot for the request ID
/// middleware to fill.
fn make_span<B>(request: &Request<B>) -> Span {
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}

/// Browser clients call the API cross-origin with a bearer header.
fn cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::middleware::REQUEST_ID_HEADER;
    use axum::body::{Body, to_bytes};
    use axum::http::StatusCode;
    use secrecy::SecretString;
    use tower::ServiceExt;

    fn router() -> Router {
        let config =
            StorefrontConfig::with_secret(SecretString::from("k9$Qm2!vXz7@pL4#tR8&wN1^bC5*eF3%"));
        app(AppState::new(config))
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_graphiql_served_on_get() {
        let response = router()
            .oneshot(Request::builder().uri(GRAPHQL_PATH).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("graphiql"));
    }

    #[tokio::test]
    async fn test_graphql_post() {
        let body = serde_json::json!({ "query": "{ categories { name } }" }).to_string();
        let response = router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(GRAPHQL_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["data"]["categories"].as_array().map(Vec::len), Some(7));
    }
}
