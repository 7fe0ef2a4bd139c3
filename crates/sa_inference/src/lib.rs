pub mod keywords;
pub mod models;

pub use keywords::{extract_keywords, Keywords, KEYWORD_LENGTH_THRESHOLD};
pub use models::{create_scorer, sentiment_polarity, LexiconScorer, NeutralScorer};

pub mod prelude {
    pub use super::keywords::extract_keywords;
    pub use super::models::{create_scorer, sentiment_polarity};
    pub use sa_core::{Result, SentimentScorer};
}
