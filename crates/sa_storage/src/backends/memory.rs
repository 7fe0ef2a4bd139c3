use async_trait::async_trait;
use sa_core::{Post, PostStorage, RawPost, Result, SentimentScorer, Snapshot, StoreState};
use sa_inference::sentiment_polarity;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Single-writer dataset: an ordered list of validated posts.
pub struct MemoryStore {
    posts: Snapshot,
    scorer: Arc<dyn SentimentScorer>,
}

impl MemoryStore {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        Self {
            posts: Arc::new(Vec::new()),
            scorer,
        }
    }

    /// Validates the whole batch and scores each title. Nothing is
    /// committed here, so a failure leaves the store as it was.
    fn prepare(&self, records: Vec<RawPost>) -> Result<Vec<Post>> {
        records
            .into_iter()
            .enumerate()
            .map(|(i, raw)| {
                let mut post = Post::try_from(raw).map_err(|e| e.at_index(i))?;
                post.attach_sentiment(sentiment_polarity(self.scorer.as_ref(), &post.title));
                Ok(post)
            })
            .collect()
    }

    pub fn replace(&mut self, records: Vec<RawPost>) -> Result<usize> {
        let posts = self.prepare(records)?;
        let count = posts.len();
        self.posts = Arc::new(posts);
        Ok(count)
    }

    pub fn append(&mut self, records: Vec<RawPost>) -> Result<usize> {
        let posts = self.prepare(records)?;
        let count = posts.len();
        if count > 0 {
            // Copies only when a reader still holds the previous snapshot.
            Arc::make_mut(&mut self.posts).extend(posts);
        }
        Ok(count)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.posts.clone()
    }

    pub fn state(&self) -> StoreState {
        if self.posts.is_empty() {
            StoreState::Empty
        } else {
            StoreState::Populated
        }
    }
}

/// `MemoryStore` behind a lock so it can be shared between requests.
/// Writers are serialized; readers only hold the lock long enough to clone
/// the snapshot pointer.
#[derive(Clone)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
    scorer_name: String,
}

impl MemoryStorage {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        let scorer_name = scorer.name().to_string();
        Self {
            store: Arc::new(RwLock::new(MemoryStore::new(scorer))),
            scorer_name,
        }
    }
}

impl fmt::Debug for MemoryStorage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStorage")
            .field("store", &"<RwLock<MemoryStore>>")
            .field("scorer", &self.scorer_name)
            .finish()
    }
}

#[async_trait]
impl PostStorage for MemoryStorage {
    async fn replace(&self, records: Vec<RawPost>) -> Result<usize> {
        let mut store = self.store.write().await;
        let count = store.replace(records)?;
        debug!("Replaced dataset with {} posts", count);
        Ok(count)
    }

    async fn append(&self, records: Vec<RawPost>) -> Result<usize> {
        let mut store = self.store.write().await;
        let count = store.append(records)?;
        debug!("Appended {} posts", count);
        Ok(count)
    }

    async fn snapshot(&self) -> Snapshot {
        self.store.read().await.snapshot()
    }

    async fn state(&self) -> StoreState {
        self.store.read().await.state()
    }
}
