// tests/newsletter_api.rs
//
// The JSON article endpoints over a fixture feed and over a failing source,
// plus the newsletter page's degraded rendering.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::Value as Json;

use common::{get, harness, harness_with, text, DownSource, Script};
use humanist_site::newsletter::{feed::parse_feed, SubstackFeed};

const EMPTY_FEED: &str = "<rss><channel><title>Empty Humanist</title></channel></rss>";

#[tokio::test]
async fn articles_endpoint_serves_fixture_feed() {
    let h = harness();
    let resp = get(&h.app, "/api/newsletter/articles").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get("content-type")
        .is_some_and(|v| v.to_str().unwrap_or("").starts_with("application/json")));

    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(v["total_count"], 2);
    let first = &v["articles"][0];
    assert_eq!(first["title"], "The suitcase I never unpacked");
    assert_eq!(
        first["link"],
        "https://theincurablehumanist.substack.com/p/the-suitcase-i-never-unpacked"
    );
    assert_eq!(first["published"], "2025-01-05T12:00:00+00:00");
    assert_eq!(first["author"], "Denise Rodriguez Dao");
}

#[tokio::test]
async fn articles_endpoint_is_503_when_feed_is_down() {
    let h = harness_with(Script::Accept, Arc::new(DownSource));
    let resp = get(&h.app, "/api/newsletter/articles").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    let detail = v["detail"].as_str().unwrap();
    assert!(detail.starts_with("Unable to fetch newsletter articles"), "{detail}");
}

#[tokio::test]
async fn health_reports_feed_state() {
    let h = harness();
    let v: Json = serde_json::from_str(&text(get(&h.app, "/api/newsletter/health").await).await).unwrap();
    assert_eq!(v["status"], "healthy");
    assert_eq!(v["article_count"], 2);
    assert_eq!(v["feed_url"], "inline");
    assert_eq!(v["feed_title"], "The Incurable Humanist");

    let h = harness_with(Script::Accept, Arc::new(DownSource));
    let resp = get(&h.app, "/api/newsletter/health").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(v["status"], "unhealthy");
    assert_eq!(v["feed_url"], "https://down.example/feed");
}

#[tokio::test]
async fn empty_feed_is_healthy_but_serves_no_articles() {
    let h = harness_with(Script::Accept, Arc::new(SubstackFeed::from_xml(EMPTY_FEED)));
    let resp = get(&h.app, "/api/newsletter/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(v["status"], "healthy");
    assert_eq!(v["article_count"], 0);
    assert_eq!(v["feed_title"], "Empty Humanist");

    let resp = get(&h.app, "/api/newsletter/articles").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    assert_eq!(v["detail"], "RSS feed contains no articles");
}

#[tokio::test]
async fn unparsable_feed_reports_parse_failure() {
    let h = harness_with(Script::Accept, Arc::new(SubstackFeed::from_xml("<html>nope")));
    let resp = get(&h.app, "/api/newsletter/articles").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let v: Json = serde_json::from_str(&text(resp).await).unwrap();
    let detail = v["detail"].as_str().unwrap();
    assert!(detail.starts_with("Failed to parse RSS feed: "), "{detail}");

    let resp = get(&h.app, "/api/newsletter/health").await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn newsletter_page_survives_a_down_feed() {
    let h = harness_with(Script::Accept, Arc::new(DownSource));
    let resp = get(&h.app, "/newsletter").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = text(resp).await;
    assert!(html.contains("Subscribe on Substack"));
    assert!(!html.contains("Latest posts"));
}

#[test]
fn fixture_parses_with_cleaned_text() {
    let feed = parse_feed(common::FEED_FIXTURE).unwrap();
    assert_eq!(feed.title.as_deref(), Some("The Incurable Humanist"));
    assert_eq!(feed.articles.len(), 2);
    assert_eq!(
        feed.articles[0].description,
        "On leaving Caracas & the objects that stay with us."
    );
    assert_eq!(feed.articles[1].published, "2024-12-29T12:00:00+00:00");
}
