use clap::Parser;
use sa_analytics::{export_to_path, Dashboard};
use sa_core::{Config, ManualEntry, PostStorage, Result};
use sa_sources::{handle_command, init_logging, IngestMode, SourceArgs, SourceManager};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

mod duration;
mod report;

use duration::HumanDuration;

#[derive(Parser, Debug)]
#[command(author, version, about = "Engagement, sentiment and keyword analytics for social posts", long_about = None)]
pub struct Cli {
    /// Dataset backend for the session
    #[arg(long, default_value = "memory", env = "SA_STORAGE", global = true)]
    storage: String,
    /// Sentiment scorer: lexicon or neutral
    #[arg(long, default_value = "lexicon", env = "SA_SCORER", global = true)]
    scorer: String,
    /// Fetch timeout (e.g. 30s, 1m)
    #[arg(long, default_value = "30s", env = "SA_FETCH_TIMEOUT", global = true)]
    timeout: HumanDuration,
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Fetch posts, merge manual entries and print the derived views
    Analyze {
        /// Subreddit for `reddit`, file path for `file`
        #[arg(long, default_value = "python", env = "SA_TOPIC")]
        topic: String,
        #[arg(long, default_value = "reddit", env = "SA_SOURCE")]
        source: String,
        /// Number of posts to fetch (10-500 in the dashboard, clamped to 1-500)
        #[arg(long, default_value_t = 100)]
        limit: usize,
        /// Skip the fetch and analyze manual entries only
        #[arg(long)]
        no_fetch: bool,
        /// Manual post as `title[:score[:comments]]`; repeatable
        #[arg(long = "add", value_name = "POST")]
        manual: Vec<ManualEntry>,
        /// Number of keywords to show
        #[arg(long, default_value_t = 50)]
        top: usize,
        /// Number of recent posts to show
        #[arg(long, default_value_t = 10)]
        recent: usize,
        /// Print the dashboard as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Write the dataset as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Serve the analytics API over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000", env = "SA_BIND")]
        bind: String,
        /// Topic used by `POST /api/fetch` when none is given
        #[arg(long, default_value = "python", env = "SA_TOPIC")]
        topic: String,
        #[arg(long, default_value = "reddit", env = "SA_SOURCE")]
        source: String,
    },
    /// Inspect or use the post sources
    Sources(SourceArgs),
}

/// Session settings shared by every subcommand.
fn base_config(cli: &Cli) -> Config {
    Config {
        scorer: cli.scorer.clone(),
        ..Config::default()
    }
    .with_fetch_timeout(cli.timeout.0)
}

fn build_manager(storage_type: &str, config: &Config) -> Result<SourceManager> {
    let scorer = sa_inference::create_scorer(&config.scorer)?;
    let storage = sa_storage::create_storage(storage_type, scorer)?;
    info!("💾 Dataset store initialized (using {})", storage_type);
    Ok(SourceManager::with_default_sources(storage, config.fetch_timeout()))
}

async fn analyze(
    manager: &SourceManager,
    config: &Config,
    no_fetch: bool,
    manual: Vec<ManualEntry>,
    json: bool,
    export: Option<PathBuf>,
) -> Result<()> {
    if !no_fetch {
        // A failed fetch is reported but manual entries are still analyzed.
        if let Err(e) = manager
            .ingest(&config.source, &config.topic, config.limit, IngestMode::Replace)
            .await
        {
            error!("Error fetching data: {}", e);
            if manual.is_empty() {
                return Err(e);
            }
        }
    }

    for entry in manual {
        manager.add_manual(entry).await?;
    }

    let snapshot = manager.storage().snapshot().await;
    let dashboard = Dashboard::build(&snapshot, config);
    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
    } else {
        print!("{}", report::render(&dashboard));
    }

    if let Some(path) = export {
        export_to_path(&snapshot, &path)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let base = base_config(&cli);
    let manager = build_manager(&cli.storage, &base)?;

    match cli.command {
        Commands::Analyze {
            topic,
            source,
            limit,
            no_fetch,
            manual,
            top,
            recent,
            json,
            export,
        } => {
            let config = Config {
                source,
                topic,
                top_keywords: top,
                recent_posts: recent,
                ..base
            }
            .with_limit(limit);
            analyze(&manager, &config, no_fetch, manual, json, export).await?;
        }
        Commands::Serve { bind, topic, source } => {
            let config = Config {
                source,
                topic,
                bind,
                ..base
            };
            let state = sa_web::AppState::new(Arc::new(manager), config.clone());
            sa_web::serve(state, &config.bind).await?;
        }
        Commands::Sources(args) => {
            handle_command(args, &manager).await?;
        }
    }

    Ok(())
}
