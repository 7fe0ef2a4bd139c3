use sa_core::{Config, PostStorage};
use sa_sources::SourceManager;
use std::sync::Arc;

/// Shared by every request of one server session. The store serializes
/// its own writes, so handlers need no extra locking.
pub struct AppState {
    pub sources: Arc<SourceManager>,
    pub config: Config,
}

impl AppState {
    pub fn new(sources: Arc<SourceManager>, config: Config) -> Self {
        Self { sources, config }
    }

    pub fn storage(&self) -> &Arc<dyn PostStorage> {
        self.sources.storage()
    }
}
