//! In-memory data store.
//!
//! # Layout
//!
//! [`Database`] wraps a single [`Store`] behind a `tokio::sync::RwLock`.
//! Queries take the read guard; every mutation takes the write guard for its
//! whole body, so a mutation never observes a half-applied sibling.
//!
//! ## Tables
//!
//! - `users` - Accounts, profile fields, onboarding flags
//! - `password_resets` - Outstanding reset tokens
//! - `products` - Seeded catalog plus reviews
//! - `carts` - One cart per user
//! - `orders` - Placed orders
//! - `health_profiles` - Survey answers and derived profile
//!
//! Data lives for the lifetime of the process.

pub mod carts;
pub mod health_profiles;
pub mod orders;
pub mod products;
pub mod seed;
pub mod users;

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use carts::CartTable;
pub use health_profiles::HealthProfileTable;
pub use orders::OrderTable;
pub use products::ProductTable;
pub use users::{PasswordResetTable, UserTable};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// All tables.
#[derive(Debug)]
pub struct Store {
    pub users: UserTable,
    pub password_resets: PasswordResetTable,
    pub products: ProductTable,
    pub carts: CartTable,
    pub orders: OrderTable,
    pub health_profiles: HealthProfileTable,
}

impl Store {
    /// Empty store with the product catalog seeded.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: UserTable::default(),
            password_resets: PasswordResetTable::default(),
            products: ProductTable::new(seed::products()),
            carts: CartTable::default(),
            orders: OrderTable::default(),
            health_profiles: HealthProfileTable::default(),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::seeded()
    }
}

/// Shared handle to the store. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct Database {
    inner: Arc<RwLock<Store>>,
}

impl Database {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Shared access for queries.
    pub async fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.inner.read().await
    }

    /// Exclusive access for a mutation.
    pub async fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.inner.write().await
    }
}

/// Monotonic id allocator shared by the tables.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sequence(i32);

impl Default for Sequence {
    fn default() -> Self {
        Self(1)
    }
}

impl Sequence {
    pub(crate) const fn starting_at(first: i32) -> Self {
        Self(first)
    }

    pub(crate) const fn next(&mut self) -> i32 {
        let id = self.0;
        self.0 += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store_has_catalog() {
        let db = Database::default();
        let store = db.read().await;
        assert_eq!(store.products.all().len(), 8);
        assert!(store.users.is_empty());
    }

    #[test]
    fn test_sequence_increments() {
        let mut seq = Sequence::default();
        assert_eq!(seq.next(), 1);
        assert_eq!(seq.next(), 2);
        let mut seq = Sequence::starting_at(100);
        assert_eq!(seq.next(), 100);
    }
}
