//! HTTP middleware and extractors for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (hub per request, transaction per route)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. CORS
//!
//! Authentication is not a layer: the GraphQL handler reads the bearer
//! token with [`BearerToken`] and resolvers decide per field whether a
//! user is required.

pub mod auth;
pub mod request_id;

pub use auth::BearerToken;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
