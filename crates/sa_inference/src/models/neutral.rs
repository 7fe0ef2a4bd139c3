use sa_core::SentimentScorer;

/// Scores every text as neutral. Useful when sentiment is not wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralScorer;

impl SentimentScorer for NeutralScorer {
    fn name(&self) -> &str {
        "neutral"
    }

    fn polarity(&self, _text: &str) -> f64 {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_scorer() {
        assert_eq!(NeutralScorer.polarity("I love this"), 0.0);
        assert_eq!(NeutralScorer.polarity(""), 0.0);
    }
}
