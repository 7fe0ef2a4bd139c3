//! Pure views over a slice of posts. None of these fail; an empty slice
//! produces an empty (or zeroed) view.

use chrono::NaiveDate;
use sa_core::{Post, TextField};
use sa_inference::extract_keywords;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyEngagement {
    pub date: NaiveDate,
    pub total_score: u64,
    pub total_comments: u64,
}

/// Sums score and comments per UTC calendar date, oldest first. Dates
/// without posts are left out rather than zero-filled. Sums saturate at
/// `u64::MAX`.
pub fn daily_engagement(records: &[Post]) -> Vec<DailyEngagement> {
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for post in records {
        let day = days.entry(post.date()).or_insert((0, 0));
        day.0 = day.0.saturating_add(post.score);
        day.1 = day.1.saturating_add(post.comment_count);
    }
    days.into_iter()
        .map(|(date, (total_score, total_comments))| DailyEngagement {
            date,
            total_score,
            total_comments,
        })
        .collect()
}

/// Occurrences of every keyword of `field` across all posts. The map has
/// no order; use `ranked_keywords` for a stable ranking.
pub fn keyword_frequency(records: &[Post], field: TextField) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for post in records {
        for keyword in extract_keywords(field.select(post)) {
            *counts.entry(keyword).or_insert(0) += 1;
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// The `n` most frequent keywords, ties broken alphabetically.
pub fn ranked_keywords(frequency: &HashMap<String, usize>, n: usize) -> Vec<KeywordCount> {
    let mut ranked: Vec<KeywordCount> = frequency
        .iter()
        .map(|(keyword, count)| KeywordCount {
            keyword: keyword.clone(),
            count: *count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    ranked.truncate(n);
    ranked
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub posts: usize,
    pub score: u64,
    pub comments: u64,
}

pub fn totals(records: &[Post]) -> Totals {
    records.iter().fold(Totals::default(), |acc, post| Totals {
        posts: acc.posts + 1,
        score: acc.score.saturating_add(post.score),
        comments: acc.comments.saturating_add(post.comment_count),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width bins over [-1.0, 1.0]. The last bin is closed on the right
/// so a polarity of exactly 1.0 is counted. Posts without a sentiment are
/// skipped.
pub fn sentiment_histogram(records: &[Post], bins: usize) -> Vec<HistogramBin> {
    if bins == 0 {
        return Vec::new();
    }
    let width = 2.0 / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: -1.0 + i as f64 * width,
            upper: -1.0 + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for sentiment in records.iter().filter_map(Post::sentiment) {
        let index = (((sentiment + 1.0) / width).floor() as usize).min(bins - 1);
        histogram[index].count += 1;
    }
    histogram
}

/// Up to `n` posts, newest first. Posts with equal timestamps keep their
/// insertion order.
pub fn recent_posts(records: &[Post], n: usize) -> Vec<Post> {
    let mut posts = records.to_vec();
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    posts.truncate(n);
    posts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, hour, 0, 0).unwrap()
    }

    fn post(day: u32, hour: u32, title: &str, score: u64, comments: u64) -> Post {
        Post::new(at(day, hour), title, score, comments)
    }

    #[test]
    fn test_daily_engagement_empty() {
        assert!(daily_engagement(&[]).is_empty());
    }

    #[test]
    fn test_daily_engagement_groups_by_date() {
        let posts = vec![
            post(3, 23, "late", 5, 1),
            post(1, 8, "first", 10, 2),
            post(3, 1, "early", 7, 4),
            post(1, 20, "second", 1, 0),
        ];
        let series = daily_engagement(&posts);
        assert_eq!(
            series,
            vec![
                DailyEngagement {
                    date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                    total_score: 11,
                    total_comments: 2,
                },
                DailyEngagement {
                    date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
                    total_score: 12,
                    total_comments: 5,
                },
            ]
        );
    }

    #[test]
    fn test_daily_engagement_totals_match_members() {
        let posts: Vec<Post> = (0..40u32)
            .map(|i| post(1 + i % 7, i % 24, "t", u64::from(i * 3), u64::from(i)))
            .collect();
        let series = daily_engagement(&posts);

        assert!(series.windows(2).all(|w| w[0].date < w[1].date));
        for day in &series {
            let members: Vec<&Post> = posts.iter().filter(|p| p.date() == day.date).collect();
            assert!(!members.is_empty());
            assert_eq!(day.total_score, members.iter().map(|p| p.score).sum::<u64>());
            assert_eq!(day.total_comments, members.iter().map(|p| p.comment_count).sum::<u64>());
        }
        assert_eq!(series.iter().map(|d| d.total_score).sum::<u64>(), totals(&posts).score);
    }

    #[test]
    fn test_keyword_frequency_titles() {
        let posts = vec![post(1, 0, "big data tools", 0, 0), post(1, 0, "data tools rock", 0, 0)];
        let freq = keyword_frequency(&posts, TextField::Title);
        let expected: HashMap<String, usize> =
            [("data", 2), ("tools", 2), ("rock", 1)].into_iter().map(|(k, v)| (k.to_string(), v)).collect();
        assert_eq!(freq, expected);
    }

    #[test]
    fn test_keyword_frequency_body_field() {
        let posts = vec![post(1, 0, "title only", 0, 0).with_body("Body words here, body")];
        let freq = keyword_frequency(&posts, TextField::Body);
        assert_eq!(freq.get("body"), Some(&2));
        assert_eq!(freq.get("title"), None);
    }

    #[test]
    fn test_ranked_keywords_breaks_ties_alphabetically() {
        let posts = vec![post(1, 0, "zeta alpha beta", 0, 0), post(1, 0, "beta gamma zeta", 0, 0)];
        let ranked = ranked_keywords(&keyword_frequency(&posts, TextField::Title), 3);
        let names: Vec<_> = ranked.iter().map(|k| k.keyword.as_str()).collect();
        assert_eq!(names, vec!["beta", "zeta", "alpha"]);
        assert_eq!(ranked[0].count, 2);
    }

    #[test]
    fn test_totals() {
        assert_eq!(totals(&[]), Totals::default());
        let posts = vec![post(1, 0, "a", 3, 1), post(2, 0, "b", 4, 5)];
        assert_eq!(totals(&posts), Totals { posts: 2, score: 7, comments: 6 });
    }

    #[test]
    fn test_huge_counters_saturate() {
        let huge = i64::MAX as u64;
        let posts = vec![post(1, 0, "a", huge, huge), post(1, 1, "b", huge, 1), post(1, 2, "c", huge, 0)];

        let series = daily_engagement(&posts);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].total_score, u64::MAX);
        assert_eq!(series[0].total_comments, huge + 1);

        let sum = totals(&posts);
        assert_eq!(sum.posts, 3);
        assert_eq!(sum.score, u64::MAX);
    }

    #[test]
    fn test_sentiment_histogram() {
        let mut posts = vec![post(1, 0, "a", 0, 0), post(1, 0, "b", 0, 0), post(1, 0, "c", 0, 0)];
        posts[0].attach_sentiment(-1.0);
        posts[1].attach_sentiment(1.0);
        posts[2].attach_sentiment(0.0);
        let unscored = post(1, 0, "d", 0, 0);
        posts.push(unscored);

        let histogram = sentiment_histogram(&posts, 4);
        assert_eq!(histogram.len(), 4);
        assert_eq!(histogram.iter().map(|b| b.count).collect::<Vec<_>>(), vec![1, 0, 1, 1]);
        assert_eq!(histogram[0].lower, -1.0);
        assert_eq!(histogram[3].upper, 1.0);
        assert!(sentiment_histogram(&posts, 0).is_empty());
    }

    #[test]
    fn test_recent_posts_newest_first() {
        let posts = vec![post(1, 0, "old", 0, 0), post(3, 0, "new", 0, 0), post(2, 0, "mid", 0, 0)];
        let recent = recent_posts(&posts, 2);
        let titles: Vec<_> = recent.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid"]);
    }
}
