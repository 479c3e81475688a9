//! Domain models held in the in-memory store.
//!
//! The GraphQL object impls for these live in [`crate::graphql::types`].

pub mod cart;
pub mod health_profile;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem, MAX_LINE_QUANTITY};
pub use health_profile::HealthProfileRecord;
pub use order::{Order, OrderItem};
pub use product::{Category, Product, Review};
pub use user::{Address, PasswordReset, User};
