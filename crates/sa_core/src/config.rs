use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::TextField;

pub const MIN_FETCH_LIMIT: usize = 1;
pub const MAX_FETCH_LIMIT: usize = 500;
pub const MAX_HISTOGRAM_BINS: usize = 200;

/// Session settings shared by the CLI and the web server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: String,
    pub topic: String,
    pub limit: usize,
    pub fetch_timeout_secs: u64,
    pub scorer: String,
    pub keyword_field: TextField,
    pub top_keywords: usize,
    pub recent_posts: usize,
    pub histogram_bins: usize,
    pub bind: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: "reddit".to_string(),
            topic: "python".to_string(),
            limit: 100,
            fetch_timeout_secs: 30,
            scorer: "lexicon".to_string(),
            keyword_field: TextField::Title,
            top_keywords: 50,
            recent_posts: 10,
            histogram_bins: 20,
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Config {
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Sets the fetch limit, clamped to `MIN_FETCH_LIMIT..=MAX_FETCH_LIMIT`.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = clamp_limit(limit);
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_secs = timeout.as_secs().max(1);
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_FETCH_LIMIT, MAX_FETCH_LIMIT)
}

/// Caps a requested histogram bin count. Zero is kept and yields no bins.
pub fn clamp_bins(bins: usize) -> usize {
    bins.min(MAX_HISTOGRAM_BINS)
}
