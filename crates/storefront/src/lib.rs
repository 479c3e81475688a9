//! Wellnest Storefront library.
//!
//! GraphQL API server for the Wellnest storefront: accounts, onboarding,
//! catalog, cart, and checkout over an in-memory store. Exposed as a
//! library so integration tests can serve [`routes::app`] in-process.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use routes::app;
