use sa_core::{Error, Result, SentimentScorer};
use std::sync::Arc;
use tracing::info;

pub mod lexicon;
pub mod neutral;

pub use lexicon::LexiconScorer;
pub use neutral::NeutralScorer;

/// Names accepted by `create_scorer`.
pub const AVAILABLE_SCORERS: &[&str] = &["lexicon", "neutral"];

pub fn create_scorer(name: &str) -> Result<Arc<dyn SentimentScorer>> {
    let scorer: Arc<dyn SentimentScorer> = match name.to_lowercase().as_str() {
        "lexicon" => Arc::new(LexiconScorer::new()),
        "neutral" | "none" => Arc::new(NeutralScorer),
        other => {
            return Err(Error::validation(
                "scorer",
                format!("unknown scorer {:?}, available: {}", other, AVAILABLE_SCORERS.join(", ")),
            ))
        }
    };
    info!("🧠 Sentiment scorer initialized (using {})", scorer.name());
    Ok(scorer)
}

/// Polarity of `text` according to `scorer`, clamped to [-1.0, 1.0].
pub fn sentiment_polarity(scorer: &dyn SentimentScorer, text: &str) -> f64 {
    scorer.polarity(text).clamp(-1.0, 1.0)
}
