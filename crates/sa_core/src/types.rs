use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// A normalized post as held by the dataset store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub timestamp: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub score: u64,
    pub comment_count: u64,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    sentiment: Option<f64>,
}

impl Post {
    pub fn new(timestamp: DateTime<Utc>, title: impl Into<String>, score: u64, comment_count: u64) -> Self {
        Self {
            timestamp,
            title: title.into(),
            body: String::new(),
            score,
            comment_count,
            source_url: String::new(),
            sentiment: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Calendar date (UTC) the post is bucketed under.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }

    pub fn sentiment(&self) -> Option<f64> {
        self.sentiment
    }

    /// Attaches the derived sentiment. Only the first call has an effect;
    /// returns whether the value was stored.
    pub fn attach_sentiment(&mut self, polarity: f64) -> bool {
        if self.sentiment.is_some() {
            return false;
        }
        self.sentiment = Some(polarity.clamp(-1.0, 1.0));
        true
    }
}

/// A record as delivered by a source or a file, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPost {
    #[serde(default, alias = "date", alias = "created_at")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, alias = "text", alias = "selftext")]
    pub body: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, alias = "comments", alias = "num_comments")]
    pub comment_count: Option<i64>,
    #[serde(default, alias = "url")]
    pub source_url: Option<String>,
}

impl RawPost {
    pub fn new(timestamp: DateTime<Utc>, title: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_engagement(mut self, score: i64, comment_count: i64) -> Self {
        self.score = Some(score);
        self.comment_count = Some(comment_count);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }
}

fn counter(field: &str, value: Option<i64>) -> Result<u64> {
    match value {
        None => Ok(0),
        Some(v) if v < 0 => Err(Error::validation(field, format!("must be non-negative, got {}", v))),
        Some(v) => Ok(v as u64),
    }
}

impl TryFrom<RawPost> for Post {
    type Error = Error;

    fn try_from(raw: RawPost) -> Result<Self> {
        let timestamp = raw
            .timestamp
            .ok_or_else(|| Error::validation("timestamp", "is required"))?;
        let title = raw.title.ok_or_else(|| Error::validation("title", "is required"))?;
        Ok(Self {
            timestamp,
            title,
            body: raw.body.unwrap_or_default(),
            score: counter("score", raw.score)?,
            comment_count: counter("comment_count", raw.comment_count)?,
            source_url: raw.source_url.unwrap_or_default(),
            sentiment: None,
        })
    }
}

/// A post typed in by the user rather than fetched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default, alias = "comments")]
    pub comment_count: Option<i64>,
    #[serde(default, alias = "url")]
    pub source_url: Option<String>,
}

impl ManualEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    pub fn with_engagement(mut self, score: i64, comment_count: i64) -> Self {
        self.score = Some(score);
        self.comment_count = Some(comment_count);
        self
    }

    /// Stamps the entry with `entered_at` and coerces the counters to
    /// non-negative values. The title is the only required field.
    pub fn into_raw(self, entered_at: DateTime<Utc>) -> Result<RawPost> {
        let title = self.title.ok_or_else(|| Error::validation("title", "is required"))?;
        Ok(RawPost {
            timestamp: Some(entered_at),
            title: Some(title),
            body: Some(self.body.unwrap_or_default()),
            score: Some(self.score.unwrap_or(0).max(0)),
            comment_count: Some(self.comment_count.unwrap_or(0).max(0)),
            source_url: Some(self.source_url.unwrap_or_default()),
        })
    }
}

fn split_counter(s: &str) -> (&str, Option<i64>) {
    match s.rsplit_once(':') {
        Some((head, tail)) => match tail.trim().parse::<i64>() {
            Ok(value) => (head, Some(value)),
            Err(_) => (s, None),
        },
        None => (s, None),
    }
}

impl FromStr for ManualEntry {
    type Err = Error;

    /// Parses `title[:score[:comments]]`. Counters are split off from the
    /// right and only when numeric, so titles may contain colons.
    fn from_str(s: &str) -> Result<Self> {
        let (rest, last) = split_counter(s);
        let entry = match last {
            None => ManualEntry::new(s),
            Some(last) => match split_counter(rest) {
                (title, Some(score)) => ManualEntry::new(title).with_engagement(score, last),
                (title, None) => ManualEntry {
                    score: Some(last),
                    ..ManualEntry::new(title)
                },
            },
        };
        Ok(entry)
    }
}

/// Which text field of a post keyword extraction reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextField {
    #[default]
    Title,
    Body,
}

impl TextField {
    pub fn select<'a>(&self, post: &'a Post) -> &'a str {
        match self {
            TextField::Title => &post.title,
            TextField::Body => &post.body,
        }
    }
}

impl FromStr for TextField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "body" | "text" => Ok(Self::Body),
            other => Err(Error::validation("field", format!("unknown text field: {}", other))),
        }
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextField::Title => write!(f, "title"),
            TextField::Body => write!(f, "body"),
        }
    }
}
