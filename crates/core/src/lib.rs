//! Wellnest Core - Shared types and onboarding logic.
//!
//! This crate provides the pieces shared by every Wellnest component:
//! - `storefront` - GraphQL API server for the storefront
//! - `integration-tests` - End-to-end tests against a running server
//!
//! # Architecture
//!
//! The core crate contains only types and pure state machines - no I/O, no
//! storage, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere, including behind a UI.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`onboarding`] - Profile wizard and health survey controllers
//! - [`navigation`] - Client route table and protected-route gating

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod navigation;
pub mod onboarding;
pub mod types;

pub use types::*;
