use sa_core::{Error, PostSource, Result};

pub mod file;
pub mod reddit;

pub use file::FileSource;
pub use reddit::RedditSource;

pub type SourceFactory = Box<dyn Fn() -> Box<dyn PostSource> + Send + Sync>;

/// Every source shipped with the crate.
pub fn get_source_factories() -> Vec<SourceFactory> {
    vec![
        Box::new(|| Box::new(RedditSource::from_env())),
        Box::new(|| Box::new(FileSource::new())),
    ]
}

/// Rejects topics that cannot be a subreddit or similar channel name.
pub(crate) fn validate_topic(topic: &str) -> Result<&str> {
    let topic = topic.trim().trim_start_matches("r/");
    if topic.is_empty() {
        return Err(Error::validation("topic", "must not be empty"));
    }
    if !topic.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Error::validation(
            "topic",
            format!("{:?} may only contain letters, digits and underscores", topic),
        ));
    }
    Ok(topic)
}
