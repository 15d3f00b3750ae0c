//! Application state for the HTTP server.

use std::sync::Arc;

use super::auth::SessionStore;
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage operations
    pub repository: Arc<dyn FullRepository>,
    /// In-process session store for bearer-token authentication
    pub sessions: SessionStore,
}

impl AppState {
    /// Create a new application state with the given repository.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            sessions: SessionStore::new(),
        }
    }
}
