use async_trait::async_trait;
use crate::types::RawPost;
use crate::Result;

#[async_trait]
pub trait PostSource: Send + Sync {
    /// Short name used to select the source from the CLI or the API
    fn name(&self) -> &str;

    /// Fetch at most `limit` posts for `topic`. Either the whole batch is
    /// returned or an `Error::Source` describing the failure.
    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<RawPost>>;

    /// One-line description shown when listing sources
    fn description(&self) -> &str {
        ""
    }
}
