//! Application state for the HTTP server.

use std::sync::Arc;

use crate::db::{CatalogLookup, EventRepository, FullRepository};
use crate::services::{AuditSink, EventLifecycle};

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for storage and catalog reads.
    pub repository: Arc<dyn FullRepository>,
    /// Lifecycle service driving every mutation.
    pub lifecycle: Arc<EventLifecycle>,
}

impl AppState {
    /// Create a new application state over the given repository.
    pub fn new(repository: Arc<dyn FullRepository>, audit: Arc<dyn AuditSink>) -> Self {
        let events: Arc<dyn EventRepository> = repository.clone();
        let catalog: Arc<dyn CatalogLookup> = repository.clone();
        let lifecycle = Arc::new(EventLifecycle::new(events, catalog, audit));
        Self {
            repository,
            lifecycle,
        }
    }
}
