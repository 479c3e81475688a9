//! GraphQL API.
//!
//! # Layout
//!
//! - `query` - read-only fields (catalog, cart, orders, survey catalog)
//! - `mutation` - auth, onboarding, cart, checkout, reviews
//! - `types` - object impls on store models, enums, input objects
//! - `context` - state and caller lookup for resolvers
//!
//! The schema carries [`AppState`] as data. Each request adds the caller's
//! [`BearerToken`](crate::middleware::BearerToken).

mod context;
mod mutation;
mod query;
pub mod types;

use async_graphql::{EmptySubscription, Schema};

pub use mutation::MutationRoot;
pub use query::QueryRoot;

use crate::state::AppState;

/// Nesting deeper than this is rejected before execution.
const MAX_QUERY_DEPTH: usize = 12;

pub type WellnestSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema over the given state.
#[must_use]
pub fn build_schema(state: AppState) -> WellnestSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(state)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}
