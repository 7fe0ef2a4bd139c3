use sa_core::{config::clamp_bins, Config, Post};
use serde::Serialize;

use crate::aggregate::{
    daily_engagement, keyword_frequency, ranked_keywords, recent_posts, sentiment_histogram, totals,
    DailyEngagement, HistogramBin, KeywordCount, Totals,
};

/// Every derived view of one snapshot, ready to hand to a presentation
/// layer.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub totals: Totals,
    pub engagement: Vec<DailyEngagement>,
    pub keywords: Vec<KeywordCount>,
    pub sentiment: Vec<HistogramBin>,
    pub recent: Vec<Post>,
    pub posts: Vec<Post>,
}

impl Dashboard {
    pub fn build(records: &[Post], config: &Config) -> Self {
        let frequency = keyword_frequency(records, config.keyword_field);
        Self {
            totals: totals(records),
            engagement: daily_engagement(records),
            keywords: ranked_keywords(&frequency, config.top_keywords),
            sentiment: sentiment_histogram(records, clamp_bins(config.histogram_bins)),
            recent: recent_posts(records, config.recent_posts),
            posts: records.to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.totals.posts == 0
    }
}
