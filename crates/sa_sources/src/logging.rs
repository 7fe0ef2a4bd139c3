use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Prefixes every message, e.g. with the source and topic being fetched.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    fn prefix(&self) -> String {
        self.prefixes.iter().map(|p| format!("{} ", p)).collect()
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}{}", self.prefix(), message);
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}{}", self.prefix(), message);
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}{}", self.prefix(), message);
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}{}", self.prefix(), message);
    }
}

/// Installs the fmt subscriber once per process. Later calls, or a
/// subscriber installed elsewhere, are left alone.
pub fn init_logging(verbose: bool) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let level = if verbose { Level::DEBUG } else { Level::INFO };
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init();
        });
    }
    Logger::new()
}
