//! Application state shared across handlers and resolvers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::db::{Database, Store};
use crate::services::{AuthService, LoginLimiter};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. The GraphQL schema holds one copy as
/// context data.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    db: Database,
    login_limiter: LoginLimiter,
}

impl AppState {
    /// Create state over a freshly seeded store.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_store(config, Store::seeded())
    }

    /// Create state over the given store.
    #[must_use]
    pub fn with_store(config: StorefrontConfig, store: Store) -> Self {
        let login_limiter = LoginLimiter::per_minute(config.login_attempts_per_minute);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                db: Database::new(store),
                login_limiter,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the in-memory store.
    #[must_use]
    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    /// Authentication service borrowing this state's config and limiter.
    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.inner.config, &self.inner.login_limiter)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}
