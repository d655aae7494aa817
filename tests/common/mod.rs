// tests/common/mod.rs
//
// Shared fakes for the HTTP tests: an in-memory analytics client, a scripted
// form backend and fixed article sources. No network is touched.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    body::{self, Body},
    Router,
};
use http::{Request, Response};
use tower::ServiceExt as _;

use humanist_site::analytics::{DynAnalyticsClient, MemoryAnalytics};
use humanist_site::config::{Settings, SiteConfig};
use humanist_site::forms::{ContactFields, FieldError, FormBackend, SubmissionOutcome};
use humanist_site::newsletter::{ArticleSource, DynArticleSource, NewsletterArticle, SubstackFeed};
use humanist_site::{router, AppState};

pub const BODY_LIMIT: usize = 1024 * 1024;
pub const FEED_FIXTURE: &str = include_str!("../fixtures/substack_feed.xml");

/// What the scripted backend answers with.
#[derive(Clone)]
pub enum Script {
    Accept,
    Reject(Vec<FieldError>),
    Unreachable,
}

pub struct ScriptedBackend {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl FormBackend for ScriptedBackend {
    async fn submit(&self, _fields: &ContactFields) -> Result<SubmissionOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Accept => Ok(SubmissionOutcome {
                succeeded: true,
                errors: Vec::new(),
            }),
            Script::Reject(errors) => Ok(SubmissionOutcome {
                succeeded: false,
                errors: errors.clone(),
            }),
            Script::Unreachable => Err(anyhow!("connection refused")),
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Article source that always fails, like an unreachable feed.
pub struct DownSource;

#[async_trait::async_trait]
impl ArticleSource for DownSource {
    async fn fetch_articles(&self) -> Result<Vec<NewsletterArticle>> {
        Err(anyhow!("feed http get(): connection refused"))
    }

    fn origin(&self) -> String {
        "https://down.example/feed".to_string()
    }
}

pub fn fixture_feed() -> DynArticleSource {
    Arc::new(SubstackFeed::from_xml(FEED_FIXTURE))
}

pub struct Harness {
    pub app: Router,
    pub analytics: Arc<MemoryAnalytics>,
    pub backend: Arc<ScriptedBackend>,
}

pub fn harness_with(script: Script, feed: DynArticleSource) -> Harness {
    let site = SiteConfig::embedded().expect("embedded site config");
    let settings = Settings::from_lookup(|_| None);
    let analytics = Arc::new(MemoryAnalytics::default());
    let backend = ScriptedBackend::new(script);
    let state = AppState::new(
        site,
        settings,
        Some(analytics.clone() as DynAnalyticsClient),
        backend.clone(),
        feed,
    );
    Harness {
        app: router(state),
        analytics,
        backend,
    }
}

pub fn harness() -> Harness {
    harness_with(Script::Accept, fixture_feed())
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("oneshot")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).expect("build GET")).await
}

pub async fn text(resp: Response<Body>) -> String {
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}
