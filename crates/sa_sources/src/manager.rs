use chrono::Utc;
use clap::ValueEnum;
use sa_core::{Error, ManualEntry, PostSource, PostStorage, RawPost, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use crate::logging::Logger;
use crate::sources::{get_source_factories, SourceFactory};

/// How a fetched batch is combined with the current dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IngestMode {
    /// Discard the current dataset first.
    #[default]
    Replace,
    /// Keep the current dataset and add the batch after it.
    Append,
}

/// Owns the registered sources and hands fetched batches to the store.
pub struct SourceManager {
    storage: Arc<dyn PostStorage>,
    sources: BTreeMap<String, Arc<dyn PostSource>>,
    timeout: Duration,
}

impl SourceManager {
    pub fn new(storage: Arc<dyn PostStorage>, timeout: Duration) -> Self {
        Self {
            storage,
            sources: BTreeMap::new(),
            timeout,
        }
    }

    /// A manager with every built-in source registered.
    pub fn with_default_sources(storage: Arc<dyn PostStorage>, timeout: Duration) -> Self {
        let mut manager = Self::new(storage, timeout);
        for factory in get_source_factories() {
            manager.add_source_factory(factory);
        }
        manager
    }

    pub fn add_source_factory(&mut self, factory: SourceFactory) {
        self.add_source(Arc::from(factory()));
    }

    /// Registers `source`, replacing any source with the same name.
    pub fn add_source(&mut self, source: Arc<dyn PostSource>) {
        self.sources.insert(source.name().to_string(), source);
    }

    pub fn storage(&self) -> &Arc<dyn PostStorage> {
        &self.storage
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn sources(&self) -> impl Iterator<Item = &Arc<dyn PostSource>> {
        self.sources.values()
    }

    pub fn get_source(&self, name: &str) -> Result<Arc<dyn PostSource>> {
        self.sources.get(name).cloned().ok_or_else(|| {
            let known: Vec<&str> = self.sources.keys().map(String::as_str).collect();
            Error::validation(
                "source",
                format!("unknown source {:?}, available: {}", name, known.join(", ")),
            )
        })
    }

    /// Runs one fetch bounded by the manager's timeout.
    pub async fn fetch(&self, source: &str, topic: &str, limit: usize) -> Result<Vec<RawPost>> {
        let source = self.get_source(source)?;
        match tokio::time::timeout(self.timeout, source.fetch(topic, limit)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Source(format!(
                "{} fetch for {:?} timed out after {}s",
                source.name(),
                topic,
                self.timeout.as_secs()
            ))),
        }
    }

    /// Fetches a batch and commits it to the store in one step. On any
    /// error, or an empty batch, the store keeps its previous content.
    pub async fn ingest(&self, source: &str, topic: &str, limit: usize, mode: IngestMode) -> Result<usize> {
        let logger = Logger::new()
            .with_prefix(format!("[{}]", source))
            .with_prefix(topic.to_string());
        logger.info(&format!("🦗 Fetching up to {} posts", limit));

        let records = match self.fetch(source, topic, limit).await {
            Ok(records) => records,
            Err(e) => {
                logger.warn(&format!("⚠️ Fetch failed, dataset unchanged: {}", e));
                return Err(e);
            }
        };

        logger.debug(&format!("Fetched {} records", records.len()));
        if records.is_empty() {
            logger.warn("⚠️ Fetch returned no posts, dataset unchanged");
            return Ok(0);
        }

        let committed = match mode {
            IngestMode::Replace => self.storage.replace(records).await,
            IngestMode::Append => self.storage.append(records).await,
        };
        let count = match committed {
            Ok(count) => count,
            Err(e) => {
                logger.error(&format!("❌ Batch rejected, dataset unchanged: {}", e));
                return Err(e);
            }
        };
        logger.info(&format!("✨ Stored {} posts ({} total)", count, self.storage.len().await));
        Ok(count)
    }

    pub async fn add_manual(&self, entry: ManualEntry) -> Result<usize> {
        sa_storage::ingest_manual(self.storage.as_ref(), entry, Utc::now()).await
    }

    pub fn list_sources(&self) -> Vec<(String, String)> {
        self.sources
            .values()
            .map(|s| (s.name().to_string(), s.description().to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use sa_core::StoreState;
    use sa_inference::models::NeutralScorer;
    use sa_storage::MemoryStorage;

    struct MockSource {
        posts: Vec<RawPost>,
    }

    struct FailingSource;

    struct SlowSource;

    fn raw(title: &str) -> RawPost {
        RawPost::new(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(), title).with_engagement(4, 1)
    }

    #[async_trait]
    impl PostSource for MockSource {
        fn name(&self) -> &str {
            "mock"
        }

        async fn fetch(&self, _topic: &str, limit: usize) -> Result<Vec<RawPost>> {
            Ok(self.posts.iter().take(limit).cloned().collect())
        }
    }

    #[async_trait]
    impl PostSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch(&self, _topic: &str, _limit: usize) -> Result<Vec<RawPost>> {
            Err(Error::Source("401 unauthorized".to_string()))
        }
    }

    #[async_trait]
    impl PostSource for SlowSource {
        fn name(&self) -> &str {
            "slow"
        }

        async fn fetch(&self, _topic: &str, _limit: usize) -> Result<Vec<RawPost>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![raw("too late")])
        }
    }

    fn manager() -> SourceManager {
        let storage = Arc::new(MemoryStorage::new(Arc::new(NeutralScorer)));
        let mut manager = SourceManager::new(storage, Duration::from_millis(200));
        manager.add_source(Arc::new(MockSource {
            posts: vec![raw("one"), raw("two"), raw("three")],
        }));
        manager.add_source(Arc::new(FailingSource));
        manager.add_source(Arc::new(SlowSource));
        manager
    }

    async fn titles(manager: &SourceManager) -> Vec<String> {
        manager.storage().snapshot().await.iter().map(|p| p.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_ingest_replace_and_append() {
        let manager = manager();
        manager.add_manual(ManualEntry::new("manual")).await.unwrap();

        assert_eq!(manager.ingest("mock", "any", 2, IngestMode::Replace).await.unwrap(), 2);
        assert_eq!(titles(&manager).await, vec!["one", "two"]);

        manager.ingest("mock", "any", 1, IngestMode::Append).await.unwrap();
        assert_eq!(titles(&manager).await, vec!["one", "two", "one"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_unchanged() {
        let manager = manager();
        manager.ingest("mock", "any", 3, IngestMode::Replace).await.unwrap();

        let err = manager.ingest("failing", "any", 3, IngestMode::Replace).await.unwrap_err();
        assert_eq!(err.to_string(), "Source error: 401 unauthorized");
        assert_eq!(titles(&manager).await, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_empty_fetch_keeps_existing_posts() {
        let mut manager = manager();
        manager.add_source(Arc::new(MockSource { posts: Vec::new() }));
        manager.add_manual(ManualEntry::new("keep me")).await.unwrap();

        assert_eq!(manager.ingest("mock", "any", 10, IngestMode::Replace).await.unwrap(), 0);
        assert_eq!(titles(&manager).await, vec!["keep me"]);
        assert_eq!(manager.storage().state().await, StoreState::Populated);
    }

    #[tokio::test]
    async fn test_timeout_is_source_error() {
        let manager = manager();
        let err = manager.ingest("slow", "any", 3, IngestMode::Append).await.unwrap_err();
        assert!(matches!(err, Error::Source(ref m) if m.contains("timed out")));
        assert_eq!(manager.storage().state().await, StoreState::Empty);
    }

    #[tokio::test]
    async fn test_invalid_batch_is_not_committed() {
        let storage = Arc::new(MemoryStorage::new(Arc::new(NeutralScorer)));
        let mut manager = SourceManager::new(storage, Duration::from_secs(1));
        manager.add_source(Arc::new(MockSource {
            posts: vec![raw("fine"), RawPost::default()],
        }));

        let err = manager.ingest("mock", "any", 10, IngestMode::Append).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(manager.storage().state().await, StoreState::Empty);
    }

    #[tokio::test]
    async fn test_unknown_source() {
        let manager = manager();
        let err = manager.fetch("twitter", "any", 1).await.unwrap_err();
        assert!(err.to_string().contains("failing, mock, slow"));
    }

    #[test]
    fn test_default_sources_registered() {
        let storage = Arc::new(MemoryStorage::new(Arc::new(NeutralScorer)));
        let manager = SourceManager::with_default_sources(storage, Duration::from_secs(1));
        let names: Vec<String> = manager.list_sources().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["file", "reddit"]);
    }
}
