pub mod cli;
pub mod logging;
pub mod manager;
pub mod sources;

pub use cli::{handle_command, SourceArgs, SourceCommands};
pub use logging::{init_logging, Logger};
pub use manager::{IngestMode, SourceManager};
pub use sources::{get_source_factories, FileSource, RedditSource, SourceFactory};

pub mod prelude {
    pub use super::manager::{IngestMode, SourceManager};
    pub use sa_core::{Error, PostSource, RawPost, Result};
}
