use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::DateTime;
use metrics::counter;
use quick_xml::de::from_str;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use super::{normalize_text, ArticleSource, FeedHealth, NewsletterArticle};

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(default)]
    title: Option<String>,
    #[serde(rename = "item", default)]
    item: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
    link: Option<String>,
    #[serde(rename = "pubDate")]
    pub_date: Option<String>,
    description: Option<String>,
    #[serde(rename = "creator", alias = "dc:creator")]
    creator: Option<String>,
}

/// RFC 2822 feed date -> RFC 3339; unparsable input is kept verbatim.
fn published_iso(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => DateTime::parse_from_rfc2822(s)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_else(|_| s.to_string()),
        None => chrono::Utc::now().to_rfc3339(),
    }
}

/// Parsed feed plus the channel title reported by the health endpoint.
#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub articles: Vec<NewsletterArticle>,
}

/// Feed failures whose wording is shown to API clients as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    Parse(String),
    Empty,
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Parse(reason) => write!(f, "Failed to parse RSS feed: {reason}"),
            FeedError::Empty => f.write_str("RSS feed contains no articles"),
        }
    }
}

impl std::error::Error for FeedError {}

pub fn parse_feed(xml: &str) -> Result<ParsedFeed> {
    let rss: Rss = from_str(xml).map_err(|e| FeedError::Parse(e.to_string()))?;

    let mut articles = Vec::with_capacity(rss.channel.item.len());
    for it in rss.channel.item {
        let title = it
            .title
            .as_deref()
            .map(normalize_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string());
        let link = it.link.unwrap_or_default().trim().to_string();
        if link.is_empty() {
            tracing::debug!(%title, "skipping feed item without link");
            continue;
        }
        articles.push(NewsletterArticle {
            title,
            link,
            description: it.description.as_deref().map(normalize_text).unwrap_or_default(),
            published: published_iso(it.pub_date.as_deref()),
            author: it.creator.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        });
    }

    Ok(ParsedFeed {
        title: rss.channel.title.map(|t| normalize_text(&t)),
        articles,
    })
}

/// Substack RSS feed reader.
pub struct SubstackFeed {
    mode: Mode,
}

enum Mode {
    Inline(String),
    Http { url: String, client: reqwest::Client },
}

impl SubstackFeed {
    pub fn from_url(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("humanist-site/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .context("building feed http client")?;
        Ok(Self {
            mode: Mode::Http {
                url: url.into(),
                client,
            },
        })
    }

    /// Serve a fixed document; used by tests and offline previews.
    pub fn from_xml(xml: impl Into<String>) -> Self {
        Self {
            mode: Mode::Inline(xml.into()),
        }
    }

    pub async fn fetch(&self) -> Result<ParsedFeed> {
        let res = match &self.mode {
            Mode::Inline(s) => parse_feed(s),
            Mode::Http { url, client } => match Self::download(url, client).await {
                Ok(body) => parse_feed(&body),
                Err(e) => {
                    tracing::warn!(error = ?e, feed = %url, "feed http error");
                    Err(e)
                }
            },
        };
        if res.is_err() {
            counter!("site_feed_errors_total").increment(1);
        }
        res
    }

    async fn download(url: &str, client: &reqwest::Client) -> Result<String> {
        let resp = client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .context("feed http get()")?;
        resp.text().await.context("feed http .text()")
    }
}

#[async_trait]
impl ArticleSource for SubstackFeed {
    async fn fetch_articles(&self) -> Result<Vec<NewsletterArticle>> {
        let feed = self.fetch().await?;
        if feed.articles.is_empty() {
            return Err(FeedError::Empty.into());
        }
        Ok(feed.articles)
    }

    async fn check_health(&self) -> Result<FeedHealth> {
        let feed = self.fetch().await?;
        Ok(FeedHealth {
            article_count: feed.articles.len(),
            title: feed.title,
        })
    }

    fn origin(&self) -> String {
        match &self.mode {
            Mode::Inline(_) => "inline".to_string(),
            Mode::Http { url, .. } => url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rfc2822_dates_become_iso() {
        assert_eq!(
            published_iso(Some("Sun, 05 Jan 2025 12:00:00 GMT")),
            "2025-01-05T12:00:00+00:00"
        );
        assert_eq!(published_iso(Some("last tuesday")), "last tuesday");
    }

    #[test]
    fn missing_link_items_are_skipped() {
        let xml = r#"<rss version="2.0"><channel><title>T</title>
            <item><title>No link</title></item>
            <item><title>Has link</title><link>https://x.substack.com/p/a</link></item>
        </channel></rss>"#;
        let feed = parse_feed(xml).unwrap();
        assert_eq!(feed.articles.len(), 1);
        assert_eq!(feed.articles[0].title, "Has link");
        assert_eq!(feed.title.as_deref(), Some("T"));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let err = parse_feed("<html>nope").unwrap_err();
        assert!(matches!(err.downcast_ref::<FeedError>(), Some(FeedError::Parse(_))));
        assert!(err.to_string().starts_with("Failed to parse RSS feed: "));
    }

    #[tokio::test]
    async fn empty_feed_is_healthy_but_has_no_articles() {
        let feed = SubstackFeed::from_xml("<rss><channel><title>Empty Humanist</title></channel></rss>");
        let health = feed.check_health().await.unwrap();
        assert_eq!(health.article_count, 0);
        assert_eq!(health.title.as_deref(), Some("Empty Humanist"));

        let err = feed.fetch_articles().await.unwrap_err();
        assert_eq!(err.downcast_ref::<FeedError>(), Some(&FeedError::Empty));
    }

    #[tokio::test]
    async fn unreachable_feed_is_an_error() {
        let feed = SubstackFeed::from_url("http://127.0.0.1:9/feed").unwrap();
        assert!(feed.fetch().await.is_err());
        assert!(feed.check_health().await.is_err());
    }
}
