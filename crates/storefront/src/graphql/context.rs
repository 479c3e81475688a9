//! Resolver helpers for reaching application state and the caller.

use std::str::FromStr;

use async_graphql::{Context, ID};

use crate::db::UserTable;
use crate::error::{GraphQLResultExt, set_sentry_user};
use crate::middleware::BearerToken;
use crate::models::User;
use crate::state::AppState;

/// Application state registered as schema data.
pub fn state<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a AppState> {
    ctx.data::<AppState>()
}

/// The signed-in user, resolved from the request's bearer token against
/// `users`. Pass the table from whichever guard the resolver already holds.
pub fn current_user(ctx: &Context<'_>, users: &UserTable) -> async_graphql::Result<User> {
    let header = ctx
        .data_opt::<BearerToken>()
        .and_then(|token| token.0.as_deref());

    let user = state(ctx)?.auth().authenticate(users, header).graphql()?;
    set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(user)
}

/// Parse a GraphQL ID into a typed id. Malformed ids yield `None`.
pub fn parse_id<T: FromStr>(id: &ID) -> Option<T> {
    id.as_str().parse().ok()
}
