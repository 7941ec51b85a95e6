//! Application state shared across handlers.

use std::sync::Arc;

use todo_store::{StoreResult, TodoStore};

use crate::config::ServerConfig;

/// Application state shared across all handlers.
///
/// This is cloneable and can be extracted in handlers using `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    /// The todo store; also owns the event notifier.
    store: Arc<TodoStore>,
    /// Server configuration.
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Create new application state around an existing store.
    pub fn new(store: TodoStore, config: ServerConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Build the store described by `config`, seeding demo data if enabled.
    pub fn from_config(config: ServerConfig) -> StoreResult<Self> {
        let store = TodoStore::new(config.notifier_config());
        if config.seed_demo_data {
            let seeded = store.seed_demo_data()?;
            tracing::info!(count = seeded.len(), "Seeded demo todos");
        }
        Ok(Self::new(store, config))
    }

    /// Get a reference to the todo store.
    pub fn store(&self) -> &TodoStore {
        &self.store
    }

    /// Get a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("todos", &self.store.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_seeds_when_enabled() {
        let state = AppState::from_config(ServerConfig::default()).unwrap();
        assert_eq!(state.store().len(), 2);
    }

    #[test]
    fn test_from_config_empty_when_disabled() {
        let config = ServerConfig {
            seed_demo_data: false,
            ..ServerConfig::default()
        };
        let state = AppState::from_config(config).unwrap();
        assert!(state.store().is_empty());
    }
}
