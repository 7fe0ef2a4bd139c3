use clap::{Args, Subcommand};
use sa_core::Result;

use crate::manager::{IngestMode, SourceManager};

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    #[command(subcommand)]
    pub command: SourceCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SourceCommands {
    /// List available sources
    List,
    /// Fetch posts into the session dataset and report how many were stored
    Fetch {
        /// Source name (see `list`)
        #[arg(long, default_value = "reddit")]
        source: String,
        /// Subreddit for `reddit`, file path for `file`
        topic: String,
        #[arg(long, default_value_t = 100)]
        limit: usize,
        #[arg(long, value_enum, default_value_t = IngestMode::Replace)]
        mode: IngestMode,
    },
}

pub async fn handle_command(args: SourceArgs, manager: &SourceManager) -> Result<()> {
    match args.command {
        SourceCommands::List => {
            println!("Available sources:");
            for (name, description) in manager.list_sources() {
                println!("  {:<8} {}", name, description);
            }
        }
        SourceCommands::Fetch {
            source,
            topic,
            limit,
            mode,
        } => {
            let limit = sa_core::config::clamp_limit(limit);
            let count = manager.ingest(&source, &topic, limit, mode).await?;
            println!("Stored {} posts from {}:{}", count, source, topic);
        }
    }
    Ok(())
}
