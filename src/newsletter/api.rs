use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use super::{ArticleSource, ArticlesResponse, NewsletterArticle, ARTICLES_PATH};

/// Reads articles from a separately deployed article API.
pub struct ApiArticleSource {
    url: String,
    client: reqwest::Client,
}

impl ApiArticleSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("building article api client")?;
        Ok(Self {
            url: format!("{}{}", base_url.trim_end_matches('/'), ARTICLES_PATH),
            client,
        })
    }
}

#[async_trait]
impl ArticleSource for ApiArticleSource {
    async fn fetch_articles(&self) -> Result<Vec<NewsletterArticle>> {
        let body: ArticlesResponse = self
            .client
            .get(&self.url)
            .send()
            .await
            .context("article api get")?
            .error_for_status()
            .context("article api non-2xx")?
            .json()
            .await
            .context("article api json")?;
        Ok(body.articles)
    }

    fn origin(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_and_path() {
        let s = ApiArticleSource::new("http://localhost:8000/").unwrap();
        assert_eq!(s.origin(), "http://localhost:8000/api/newsletter/articles");
    }
}
