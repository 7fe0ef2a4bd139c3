use async_trait::async_trait;
use sa_core::{Error, PostSource, RawPost, Result};
use std::path::Path;
use tracing::debug;

/// Reads posts from a local file. The topic is the path: `.csv` files are
/// read in the export format, anything else as a JSON array of posts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<Vec<RawPost>> {
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
        if is_csv {
            sa_analytics::import_from_path(path)
        } else {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }
    }
}

#[async_trait]
impl PostSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    fn description(&self) -> &str {
        "posts from a local JSON or CSV file (topic = path)"
    }

    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<RawPost>> {
        let path = Path::new(topic).to_path_buf();
        let mut posts = tokio::task::spawn_blocking(move || Self::load(&path))
            .await
            .map_err(|e| Error::Source(format!("file reader task failed: {}", e)))?
            .map_err(|e| match e {
                Error::Validation { .. } => e,
                other => Error::Source(format!("cannot read {}: {}", topic, other)),
            })?;
        posts.truncate(limit);
        debug!("Read {} posts from {}", posts.len(), topic);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sa_core::Post;
    use std::io::Write;

    #[tokio::test]
    async fn test_reads_json_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"timestamp":"2024-01-01T00:00:00Z","title":"one","score":1}},
                {{"date":"2024-01-02T00:00:00Z","title":"two","comments":3}}]"#
        )
        .unwrap();

        let posts = FileSource::new()
            .fetch(file.path().to_str().unwrap(), 10)
            .await
            .unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].comment_count, Some(3));
    }

    #[tokio::test]
    async fn test_reads_export_csv_and_truncates() {
        let posts: Vec<Post> = (1..=3)
            .map(|d| Post::new(Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap(), format!("post {}", d), 1, 1))
            .collect();
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        sa_analytics::export_to_path(&posts, file.path()).unwrap();

        let raw = FileSource::new()
            .fetch(file.path().to_str().unwrap(), 2)
            .await
            .unwrap();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].title.as_deref(), Some("post 1"));
    }

    #[tokio::test]
    async fn test_missing_file_is_source_error() {
        let err = FileSource::new().fetch("/nonexistent/posts.json", 10).await.unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }
}
