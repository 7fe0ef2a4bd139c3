use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use sa_core::{Error, PostSource, RawPost, Result};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::validate_topic;

const PUBLIC_BASE_URL: &str = "https://www.reddit.com";
const OAUTH_BASE_URL: &str = "https://oauth.reddit.com";
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const PERMALINK_BASE: &str = "https://reddit.com";
const USER_AGENT: &str = concat!("sa-social-analytics/", env!("CARGO_PKG_VERSION"));
/// Reddit caps a listing page at 100 children.
const PAGE_SIZE: usize = 100;

pub const CLIENT_ID_ENV: &str = "SA_REDDIT_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "SA_REDDIT_CLIENT_SECRET";

#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
    after: Option<String>,
}

#[derive(Deserialize)]
struct Child {
    data: RedditPost,
}

#[derive(Deserialize)]
struct RedditPost {
    title: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: i64,
    #[serde(default)]
    permalink: String,
    created_utc: f64,
}

impl RedditPost {
    fn into_raw(self) -> Option<RawPost> {
        let secs = self.created_utc.trunc() as i64;
        let nanos = (self.created_utc.fract() * 1e9) as u32;
        let timestamp = DateTime::<Utc>::from_timestamp(secs, nanos)?;
        // Listing scores can dip below zero; counters are non-negative.
        Some(
            RawPost::new(timestamp, self.title)
                .with_body(self.selftext)
                .with_engagement(self.score.max(0), self.num_comments.max(0))
                .with_source_url(format!("{}{}", PERMALINK_BASE, self.permalink)),
        )
    }
}

/// `hot` listing of a subreddit. Uses an application-only OAuth token when
/// credentials are configured and the public JSON listing otherwise.
pub struct RedditSource {
    client: Client,
    credentials: Option<RedditCredentials>,
    base_url: Option<String>,
}

impl RedditSource {
    pub fn new(credentials: Option<RedditCredentials>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self {
            client,
            credentials,
            base_url: None,
        }
    }

    /// Reads `SA_REDDIT_CLIENT_ID` / `SA_REDDIT_CLIENT_SECRET`; both must be
    /// set for OAuth to be used.
    pub fn from_env() -> Self {
        let credentials = match (std::env::var(CLIENT_ID_ENV), std::env::var(CLIENT_SECRET_ENV)) {
            (Ok(client_id), Ok(client_secret)) if !client_id.is_empty() => Some(RedditCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };
        Self::new(credentials)
    }

    /// Points listing requests at another host, e.g. a local fixture server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    fn listing_base(&self) -> &str {
        match (&self.base_url, &self.credentials) {
            (Some(url), _) => url,
            (None, Some(_)) => OAUTH_BASE_URL,
            (None, None) => PUBLIC_BASE_URL,
        }
    }

    fn listing_url(&self, topic: &str, page_size: usize, after: Option<&str>) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/r/{}/hot.json", self.listing_base(), topic))
            .map_err(|e| Error::Source(format!("invalid listing URL: {}", e)))?;
        url.query_pairs_mut()
            .append_pair("limit", &page_size.to_string())
            .append_pair("raw_json", "1");
        if let Some(after) = after {
            url.query_pairs_mut().append_pair("after", after);
        }
        Ok(url)
    }

    async fn access_token(&self) -> Result<Option<String>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };
        let response = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&credentials.client_id, Some(&credentials.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Source(format!("authentication request failed: {}", e)))?;
        let response = check_status(response)?;
        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Source(format!("unexpected token response: {}", e)))?;
        Ok(Some(token.access_token))
    }

    async fn fetch_page(&self, url: Url, token: Option<&str>) -> Result<ListingData> {
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| Error::Source(format!("listing request failed: {}", e)))?;
        let listing: Listing = check_status(response)?
            .json()
            .await
            .map_err(|e| Error::Source(format!("unexpected listing response: {}", e)))?;
        Ok(listing.data)
    }
}

impl fmt::Debug for RedditSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditSource")
            .field("client", &"<reqwest::Client>")
            .field("credentials", &self.credentials.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.listing_base())
            .finish()
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let reason = match status.as_u16() {
        401 | 403 => "authentication rejected or subreddit private",
        404 => "subreddit not found",
        429 => "rate limited, retry later",
        500..=599 => "reddit is unavailable",
        _ => "unexpected response",
    };
    Err(Error::Source(format!("{} (HTTP {})", reason, status.as_u16())))
}

fn parse_listing(data: ListingData) -> (Vec<RawPost>, Option<String>) {
    let posts = data
        .children
        .into_iter()
        .filter_map(|child| child.data.into_raw())
        .collect();
    (posts, data.after)
}

#[async_trait]
impl PostSource for RedditSource {
    fn name(&self) -> &str {
        "reddit"
    }

    fn description(&self) -> &str {
        "hot posts of a subreddit (topic = subreddit name)"
    }

    async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<RawPost>> {
        let topic = validate_topic(topic)?;
        let token = self.access_token().await?;
        let mut posts = Vec::with_capacity(limit);
        let mut after: Option<String> = None;

        while posts.len() < limit {
            let page_size = (limit - posts.len()).min(PAGE_SIZE);
            let url = self.listing_url(topic, page_size, after.as_deref())?;
            debug!("Fetching {}", url);
            let (page, next) = parse_listing(self.fetch_page(url, token.as_deref()).await?);
            if page.is_empty() {
                break;
            }
            posts.extend(page);
            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        posts.truncate(limit);
        info!("📥 Fetched {} posts from r/{}", posts.len(), topic);
        Ok(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "Listing",
        "data": {
            "after": "t3_abc",
            "children": [
                {"kind": "t3", "data": {
                    "title": "Python 3.13 released",
                    "selftext": "Changelog inside",
                    "score": 1200,
                    "num_comments": 310,
                    "permalink": "/r/python/comments/abc/python_313_released/",
                    "created_utc": 1717243200.5
                }},
                {"kind": "t3", "data": {
                    "title": "Controversial take",
                    "score": -3,
                    "num_comments": 12,
                    "permalink": "/r/python/comments/def/controversial/",
                    "created_utc": 1717246800.0
                }}
            ]
        }
    }"#;

    #[test]
    fn test_parse_listing() {
        let listing: Listing = serde_json::from_str(LISTING).unwrap();
        let (posts, after) = parse_listing(listing.data);
        assert_eq!(after.as_deref(), Some("t3_abc"));
        assert_eq!(posts.len(), 2);

        let first = &posts[0];
        assert_eq!(first.title.as_deref(), Some("Python 3.13 released"));
        assert_eq!(first.body.as_deref(), Some("Changelog inside"));
        assert_eq!(first.score, Some(1200));
        assert_eq!(first.comment_count, Some(310));
        assert_eq!(
            first.source_url.as_deref(),
            Some("https://reddit.com/r/python/comments/abc/python_313_released/")
        );
        assert_eq!(first.timestamp.unwrap().timestamp(), 1717243200);

        assert_eq!(posts[1].score, Some(0));
        assert_eq!(posts[1].body.as_deref(), Some(""));
    }

    #[test]
    fn test_listing_url() {
        let source = RedditSource::new(None);
        let url = source.listing_url("rust", 50, None).unwrap();
        assert_eq!(url.as_str(), "https://www.reddit.com/r/rust/hot.json?limit=50&raw_json=1");

        let source = RedditSource::new(Some(RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "secret".to_string(),
        }));
        let url = source.listing_url("rust", 100, Some("t3_x")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://oauth.reddit.com/r/rust/hot.json?limit=100&raw_json=1&after=t3_x"
        );
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let source = RedditSource::new(Some(RedditCredentials {
            client_id: "id".to_string(),
            client_secret: "hunter2".to_string(),
        }));
        let debug = format!("{:?}", source);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_invalid_topic_is_rejected_before_any_request() {
        let source = RedditSource::new(None).with_base_url("http://127.0.0.1:9");
        let err = source.fetch("not a subreddit", 10).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_source_error() {
        let source = RedditSource::new(None).with_base_url("http://127.0.0.1:9");
        let err = source.fetch("rust", 10).await.unwrap_err();
        assert!(matches!(err, Error::Source(_)), "got {:?}", err);
    }
}
