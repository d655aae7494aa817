// src/newsletter/mod.rs
//! Newsletter articles: the Substack RSS feed, the JSON article API and the
//! `ArticleSource` seam the pages read through.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::{Settings, SiteConfig};

pub mod api;
pub mod feed;

pub use api::ApiArticleSource;
pub use feed::{FeedError, SubstackFeed};

/// Path of the JSON article listing, relative to the API base URL.
pub const ARTICLES_PATH: &str = "/api/newsletter/articles";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsletterArticle {
    pub title: String,
    pub link: String,
    pub description: String,
    /// ISO-8601 when the feed date parsed, otherwise the raw feed value.
    pub published: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlesResponse {
    pub articles: Vec<NewsletterArticle>,
    #[serde(default)]
    pub total_count: usize,
}

impl From<Vec<NewsletterArticle>> for ArticlesResponse {
    fn from(articles: Vec<NewsletterArticle>) -> Self {
        let total_count = articles.len();
        Self {
            articles,
            total_count,
        }
    }
}

/// Reachability report for a source, as served by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedHealth {
    pub article_count: usize,
    pub title: Option<String>,
}

#[async_trait::async_trait]
pub trait ArticleSource: Send + Sync {
    async fn fetch_articles(&self) -> Result<Vec<NewsletterArticle>>;

    /// Whether the source answers at all. An empty but well-formed source is healthy.
    async fn check_health(&self) -> Result<FeedHealth> {
        let articles = self.fetch_articles().await?;
        Ok(FeedHealth {
            article_count: articles.len(),
            title: None,
        })
    }

    /// Where the articles come from, for health output and logs.
    fn origin(&self) -> String;
}

pub type DynArticleSource = Arc<dyn ArticleSource>;

/// The Substack feed read in-process; backs the JSON article endpoints.
pub fn feed_from_settings(settings: &Settings, site: &SiteConfig) -> Result<DynArticleSource> {
    Ok(Arc::new(SubstackFeed::from_url(settings.feed_url(site))?))
}

/// What the newsletter page reads: the in-process `feed` when the API is
/// same-origin, the remote article API otherwise.
pub fn page_source(settings: &Settings, feed: DynArticleSource) -> Result<DynArticleSource> {
    let base = settings.api_base_url();
    if base.is_empty() {
        Ok(feed)
    } else {
        Ok(Arc::new(ApiArticleSource::new(&base)?))
    }
}

/// Decode entities, strip tags and collapse whitespace.
pub fn normalize_text(s: &str) -> String {
    static RE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)</?[^>]+>").expect("tag regex"));
    static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("ws regex"));

    let decoded = html_escape::decode_html_entities(s);
    let stripped = RE_TAGS.replace_all(&decoded, " ");
    RE_WS.replace_all(&stripped, " ").trim().to_string()
}
