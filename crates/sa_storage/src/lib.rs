use chrono::{DateTime, Utc};
use sa_core::{Error, ManualEntry, PostStorage, Result, SentimentScorer};
use std::sync::Arc;
use tracing::info;

pub mod backends;

pub use backends::*;

/// Names accepted by `create_storage`.
pub const AVAILABLE_BACKENDS: &[&str] = &["memory"];

/// Builds the dataset store for one session. Only the in-memory backend
/// exists; sessions are not persisted.
pub fn create_storage(name: &str, scorer: Arc<dyn SentimentScorer>) -> Result<Arc<dyn PostStorage>> {
    match name {
        "memory" => Ok(Arc::new(MemoryStorage::new(scorer))),
        other => Err(Error::validation(
            "storage",
            format!("unknown backend {:?}, available: {}", other, AVAILABLE_BACKENDS.join(", ")),
        )),
    }
}

/// Appends a user-typed post exactly like a fetched one. The entry is
/// stamped with `entered_at` and its counters coerced before validation.
pub async fn ingest_manual(
    storage: &dyn PostStorage,
    entry: ManualEntry,
    entered_at: DateTime<Utc>,
) -> Result<usize> {
    let raw = entry.into_raw(entered_at)?;
    let count = storage.append(vec![raw]).await?;
    info!("✍️ Added manual post ({} total)", storage.len().await);
    Ok(count)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, ingest_manual};
}
