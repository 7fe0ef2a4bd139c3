use sa_analytics::Dashboard;
use std::fmt::Write;

const BAR_WIDTH: usize = 40;

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

/// Plain-text rendering of the dashboard for a terminal.
pub fn render(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    if dashboard.is_empty() {
        out.push_str("No posts in the dataset.\n");
        return out;
    }

    let totals = &dashboard.totals;
    let _ = writeln!(
        out,
        "Total posts: {}   Total score: {}   Total comments: {}\n",
        totals.posts, totals.score, totals.comments
    );

    out.push_str("Engagement trends\n");
    for day in &dashboard.engagement {
        let _ = writeln!(out, "  {}  score {:>8}  comments {:>7}", day.date, day.total_score, day.total_comments);
    }

    out.push_str("\nSentiment distribution\n");
    let peak = dashboard.sentiment.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in dashboard.sentiment.iter().filter(|b| b.count > 0) {
        let bar = "#".repeat((bin.count * BAR_WIDTH).div_ceil(peak));
        let _ = writeln!(out, "  [{:+.2}, {:+.2})  {:>4} {}", bin.lower, bin.upper, bin.count, bar);
    }

    out.push_str("\nCommon words\n");
    if dashboard.keywords.is_empty() {
        out.push_str("  (none)\n");
    }
    for keyword in &dashboard.keywords {
        let _ = writeln!(out, "  {:<20} {}", truncate(&keyword.keyword, 20), keyword.count);
    }

    out.push_str("\nRecent posts\n");
    for post in &dashboard.recent {
        let sentiment = post.sentiment().map(|s| format!("{:+.2}", s)).unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "  {}  {:<50} {:>6} {:>5} {:>6}  {}",
            post.timestamp.format("%Y-%m-%d %H:%M"),
            truncate(&post.title, 50),
            post.score,
            post.comment_count,
            sentiment,
            post.source_url
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sa_core::{Config, Post};

    #[test]
    fn test_render_empty() {
        let dashboard = Dashboard::build(&[], &Config::default());
        assert_eq!(render(&dashboard), "No posts in the dataset.\n");
    }

    #[test]
    fn test_render_sections() {
        let mut post = Post::new(Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap(), "Rust async runtime tips", 12, 3);
        post.attach_sentiment(0.5);
        let text = render(&Dashboard::build(&[post], &Config::default()));

        assert!(text.contains("Total posts: 1   Total score: 12   Total comments: 3"));
        assert!(text.contains("2024-04-02  score       12  comments       3"));
        assert!(text.contains("async"));
        assert!(text.contains("+0.50"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a longer title", 6), "a lon…");
    }
}
