//! Shared application state for the Listpad server.
//!
//! A single [`AppState`] is constructed at startup and shared across all
//! Axum handlers via `Arc`. It holds the listing store and the registry of
//! open form views.

use std::sync::Arc;
use std::time::Duration;

use listpad_core::form::SubmissionForm;
use listpad_storage::ListingStore;

use crate::config::ServerConfig;
use crate::views::ViewRegistry;

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Where validated listings are inserted.
    pub store: Arc<dyn ListingStore>,
    /// Open form views keyed by view id.
    pub views: Arc<ViewRegistry>,
    /// Delay between a successful insert and the redirect.
    pub success_delay: Duration,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn ListingStore>, config: &ServerConfig) -> Self {
        Self {
            store,
            views: Arc::new(ViewRegistry::new(config.view_ttl)),
            success_delay: config.success_delay,
        }
    }

    /// A fresh form for a new page view.
    #[must_use]
    pub fn new_form(&self) -> SubmissionForm {
        SubmissionForm::new(Arc::clone(&self.store)).with_success_delay(self.success_delay)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.name())
            .finish_non_exhaustive()
    }
}
