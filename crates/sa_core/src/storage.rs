use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

use crate::types::{Post, RawPost};
use crate::Result;

/// Immutable view of the store at one point in time.
pub type Snapshot = Arc<Vec<Post>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreState {
    Empty,
    Populated,
}

#[async_trait]
pub trait PostStorage: Send + Sync {
    /// Discard the current content and install `records`. Every record is
    /// validated first; on error the store is left untouched.
    async fn replace(&self, records: Vec<RawPost>) -> Result<usize>;

    /// Add `records` after the existing content, all or nothing.
    async fn append(&self, records: Vec<RawPost>) -> Result<usize>;

    /// Current content; later mutations do not affect the returned value.
    async fn snapshot(&self) -> Snapshot;

    async fn state(&self) -> StoreState;

    async fn len(&self) -> usize {
        self.snapshot().await.len()
    }

    async fn clear(&self) -> Result<()> {
        self.replace(Vec::new()).await.map(|_| ())
    }
}
