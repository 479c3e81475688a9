//! Business logic services for the storefront.
//!
//! # Services
//!
//! - `auth` - Password sign-up/sign-in, bearer tokens, password reset
//! - `cart` - Per-user cart mutations
//! - `catalog` - Product filtering, sorting, related products, reviews
//! - `checkout` - Order placement from the current cart
//! - `onboarding` - Profile and survey submission
//! - `recommendations` - Health-profile driven product picks
//!
//! Services never lock the store themselves. Resolvers take the guard and
//! hand the services the tables they need, so a mutation holds the write
//! lock for its whole body.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod onboarding;
pub mod recommendations;

pub use auth::{AuthError, AuthService, LoginLimiter};
pub use cart::{CartError, CartService};
pub use catalog::{CatalogError, ProductFilter, SortBy};
pub use checkout::{CardDetails, CheckoutError, CheckoutService, OrderRequest, ShippingDetails};
pub use onboarding::{OnboardingError, OnboardingService, ProfileUpdate};
