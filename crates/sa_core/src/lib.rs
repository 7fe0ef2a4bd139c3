pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod storage;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use models::SentimentScorer;
pub use source::PostSource;
pub use storage::{PostStorage, Snapshot, StoreState};
pub use types::{ManualEntry, Post, RawPost, TextField};

pub mod prelude {
    pub use super::{Config, Error, ManualEntry, Post, PostSource, PostStorage, RawPost, Result};
}
