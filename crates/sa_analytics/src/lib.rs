pub mod aggregate;
pub mod dashboard;
pub mod export;

pub use aggregate::{
    daily_engagement, keyword_frequency, ranked_keywords, recent_posts, sentiment_histogram, totals,
    DailyEngagement, HistogramBin, KeywordCount, Totals,
};
pub use dashboard::Dashboard;
pub use export::{export_to_path, import_from_path, read_csv, to_csv_bytes, write_csv, EXPORT_HEADER};

pub mod prelude {
    pub use super::aggregate::*;
    pub use super::dashboard::Dashboard;
    pub use sa_core::{Post, Result, TextField};
}
