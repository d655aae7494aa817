use std::convert::Infallible;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::analytics::{self, new_anonymous_id, Analytics, DynAnalyticsClient};
use crate::config::{Settings, SiteConfig};
use crate::forms::{FormBackend, FormspreeBackend};
use crate::newsletter::{self, DynArticleSource};
use crate::shell::{visitor_from_headers, VisitorId};

/// Everything handlers need, constructed once at boot and injected into the router.
#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
    pub settings: Arc<Settings>,
    /// `None` when analytics is not configured.
    pub analytics: Option<DynAnalyticsClient>,
    pub forms: Arc<dyn FormBackend>,
    /// The Substack feed behind `/api/newsletter/*`.
    pub feed: DynArticleSource,
    /// What the newsletter page lists; the feed itself unless a remote API is configured.
    pub articles: DynArticleSource,
}

impl AppState {
    pub fn new(
        site: SiteConfig,
        settings: Settings,
        analytics: Option<DynAnalyticsClient>,
        forms: Arc<dyn FormBackend>,
        feed: DynArticleSource,
    ) -> Self {
        Self {
            site: Arc::new(site),
            settings: Arc::new(settings),
            analytics,
            forms,
            articles: feed.clone(),
            feed,
        }
    }

    /// Read the newsletter page's articles from somewhere other than the feed.
    pub fn with_page_source(mut self, articles: DynArticleSource) -> Self {
        self.articles = articles;
        self
    }

    /// Wire the real third-party clients from settings.
    pub fn from_settings(site: SiteConfig, settings: Settings) -> Result<Self> {
        let analytics = analytics::init_provider(&settings.analytics);
        let forms = FormspreeBackend::new(&settings.forms).context("form backend")?;
        let feed = newsletter::feed_from_settings(&settings, &site).context("newsletter feed")?;
        let articles =
            newsletter::page_source(&settings, feed.clone()).context("article source")?;
        tracing::info!(
            form_backend = %forms.submit_url(),
            feed = %feed.origin(),
            articles = %articles.origin(),
            analytics = analytics.as_ref().map(|a| a.provider_name()).unwrap_or("disabled"),
            "app state ready"
        );
        Ok(Self::new(site, settings, analytics, Arc::new(forms), feed).with_page_source(articles))
    }

    /// Analytics façade bound to one visitor and page.
    pub fn analytics_for(&self, visitor: &str, page_url: &str) -> Analytics {
        Analytics::new(self.analytics.clone(), visitor).with_page_url(page_url)
    }
}

impl FromRequestParts<AppState> for Analytics {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let visitor = parts
            .extensions
            .get::<VisitorId>()
            .map(|v| v.0.clone())
            .or_else(|| visitor_from_headers(&parts.headers))
            .unwrap_or_else(new_anonymous_id);
        Ok(state.analytics_for(&visitor, parts.uri.path()))
    }
}
