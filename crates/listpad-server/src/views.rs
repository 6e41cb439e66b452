//! Registry of live form views.
//!
//! Every `GET /` opens a view: one [`SubmissionForm`] behind its own
//! `Mutex`, keyed by a random id the page carries in a hidden field. A view
//! is removed when it navigates away after a successful submission, or by
//! the background sweeper once it has been idle longer than the TTL.
//!
//! The lock is only held while a request reads or updates the form. A
//! submit marks the form busy through its flow flags before the insert
//! runs, so a second submit for the same view is refused by the form
//! itself without reaching the store.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock, watch};
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use listpad_core::form::SubmissionForm;

/// Shared handle to one view's form.
pub type ViewHandle = Arc<Mutex<SubmissionForm>>;

struct ViewEntry {
    form: ViewHandle,
    last_seen: Instant,
}

/// All open form views.
pub struct ViewRegistry {
    views: RwLock<HashMap<Uuid, ViewEntry>>,
    ttl: Duration,
}

impl ViewRegistry {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Register a new view and return its id.
    pub async fn open(&self, form: SubmissionForm) -> (Uuid, ViewHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(form));
        self.views.write().await.insert(
            id,
            ViewEntry {
                form: Arc::clone(&handle),
                last_seen: Instant::now(),
            },
        );
        (id, handle)
    }

    /// Look up a view and mark it as seen.
    pub async fn get(&self, id: Uuid) -> Option<ViewHandle> {
        let mut views = self.views.write().await;
        let entry = views.get_mut(&id)?;
        entry.last_seen = Instant::now();
        Some(Arc::clone(&entry.form))
    }

    /// Tear a view down. Returns `false` if it was already gone.
    pub async fn close(&self, id: Uuid) -> bool {
        self.views.write().await.remove(&id).is_some()
    }

    /// Remove views idle longer than the TTL. Views that are locked or
    /// mid-submit are kept regardless of age. Returns how many were removed.
    pub async fn sweep(&self) -> usize {
        let mut views = self.views.write().await;
        let before = views.len();
        let ttl = self.ttl;
        views.retain(|_, entry| {
            let busy = match entry.form.try_lock() {
                Ok(form) => form.flow().is_submitting,
                Err(_) => true,
            };
            busy || entry.last_seen.elapsed() < ttl
        });
        before - views.len()
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }
}

/// Background worker that sweeps idle views every `every` until shutdown
/// is signalled.
pub async fn sweep_worker(
    views: Arc<ViewRegistry>,
    mut shutdown: watch::Receiver<bool>,
    every: Duration,
) {
    let mut interval = tokio::time::interval(every);
    info!(interval_secs = every.as_secs(), "view sweeper started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let removed = views.sweep().await;
                if removed > 0 {
                    let remaining = views.len().await;
                    debug!(removed, remaining, "idle form views swept");
                }
            }
            _ = shutdown.changed() => {
                info!("view sweeper shutting down");
                return;
            }
        }
    }
}

impl std::fmt::Debug for ViewRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewRegistry")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
