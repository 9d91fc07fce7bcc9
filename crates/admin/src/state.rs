//! Shared application state for the console.

use std::sync::Arc;

use cardvault_core::EntityKind;

use crate::api::{EntityApi, EntityClient};
use crate::config::ConsoleConfig;

struct AppStateInner {
    config: ConsoleConfig,
    client: EntityClient,
}

/// Application state shared across all request handlers.
///
/// Cheap to clone; all fields live behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

impl AppState {
    /// Build state from configuration, wiring up the entity client.
    #[must_use]
    pub fn new(config: ConsoleConfig) -> Self {
        let client = EntityClient::new(&config);
        Self {
            inner: Arc::new(AppStateInner { config, client }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Scoped CRUD handle for one entity kind.
    #[must_use]
    pub fn entity(&self, kind: EntityKind) -> EntityApi {
        self.inner.client.entity(kind)
    }

    /// Whether the configured backend persists writes.
    #[must_use]
    pub fn writable(&self) -> bool {
        self.inner.client.writable()
    }
}
