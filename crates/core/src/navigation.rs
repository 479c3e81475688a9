//! Client route table and protected-route gating.

use std::fmt;

use crate::types::{OrderId, ProductId};

/// Every page the storefront client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientRoute {
    Login,
    Register,
    ForgotPassword,
    Profile,
    Survey,
    Products,
    ProductDetail(ProductId),
    Cart,
    Checkout,
    OrderConfirmation(OrderId),
    OrderHistory,
}

impl ClientRoute {
    /// Parse a path. `/` maps to the product list; unknown paths yield `None`.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] | [""] => Some(Self::Products),
            ["auth", "login"] => Some(Self::Login),
            ["auth", "register"] => Some(Self::Register),
            ["auth", "forgot-password"] => Some(Self::ForgotPassword),
            ["profile"] => Some(Self::Profile),
            ["survey"] => Some(Self::Survey),
            ["products"] => Some(Self::Products),
            ["products", id] => id.parse().ok().map(Self::ProductDetail),
            ["cart"] => Some(Self::Cart),
            ["checkout"] => Some(Self::Checkout),
            ["order-confirmation", id] => id.parse().ok().map(Self::OrderConfirmation),
            ["order-history"] => Some(Self::OrderHistory),
            _ => None,
        }
    }

    #[must_use]
    pub fn path(self) -> String {
        match self {
            Self::Login => "/auth/login".to_owned(),
            Self::Register => "/auth/register".to_owned(),
            Self::ForgotPassword => "/auth/forgot-password".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::Survey => "/survey".to_owned(),
            Self::Products => "/products".to_owned(),
            Self::ProductDetail(id) => format!("/products/{id}"),
            Self::Cart => "/cart".to_owned(),
            Self::Checkout => "/checkout".to_owned(),
            Self::OrderConfirmation(id) => format!("/order-confirmation/{id}"),
            Self::OrderHistory => "/order-history".to_owned(),
        }
    }

    /// Everything outside `/auth/*` needs a signed-in user.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        !matches!(self, Self::Login | Self::Register | Self::ForgotPassword)
    }
}

impl fmt::Display for ClientRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where to send a user right after signing in.
#[must_use]
pub const fn landing_route(profile_completed: bool, survey_completed: bool) -> ClientRoute {
    if !profile_completed {
        ClientRoute::Profile
    } else if !survey_completed {
        ClientRoute::Survey
    } else {
        ClientRoute::Products
    }
}

/// What the router does with a navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(ClientRoute),
    Redirect(ClientRoute),
}

/// Resolve a path for the given sign-in state.
///
/// Protected routes redirect to the login page when signed out. Unknown paths
/// redirect to the product list.
#[must_use]
pub fn resolve(path: &str, authenticated: bool) -> RouteDecision {
    match ClientRoute::parse(path) {
        Some(route) if route.is_protected() && !authenticated => {
            RouteDecision::Redirect(ClientRoute::Login)
        }
        Some(route) => RouteDecision::Render(route),
        None => RouteDecision::Redirect(ClientRoute::Products),
    }
}
