use std::fmt;

/// Maps text to a polarity in [-1.0, 1.0]: negative, neutral (0.0) or
/// positive. Implementations must be deterministic.
pub trait SentimentScorer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    fn polarity(&self, text: &str) -> f64;
}
