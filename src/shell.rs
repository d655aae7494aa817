//! Application shell: the document frame shared by every page, plus the
//! navigation middleware that issues the per-visit page view.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use chrono::Datelike;
use metrics::counter;
use serde_json::json;

use crate::analytics::{new_anonymous_id, props, EventName};
use crate::components::{attr, esc, social_icon_row};
use crate::config::SiteConfig;
use crate::state::AppState;

pub const VISITOR_COOKIE: &str = "tih_vid";
const VISITOR_MAX_AGE_SECS: u64 = 60 * 60 * 24 * 365;

/// Anonymous visitor id carried from the middleware to handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorId(pub String);

/// Human page name from a path: `/` is "Home", otherwise the text after the
/// leading slash with its first letter upper-cased (`/about` -> "About").
pub fn page_name(path: &str) -> String {
    let rest = path.strip_prefix('/').unwrap_or(path);
    if rest.is_empty() {
        return "Home".to_string();
    }
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => "Home".to_string(),
    }
}

pub fn nav_bar(site: &SiteConfig, current_path: &str) -> String {
    let links: String = site
        .nav
        .iter()
        .map(|entry| {
            let active = entry.path == current_path;
            let marker = if active {
                r#" class="nav-link active" aria-current="page""#
            } else {
                r#" class="nav-link""#
            };
            format!(
                r#"<a href="{}"{marker}>{}</a>"#,
                attr(&entry.path),
                esc(&entry.label)
            )
        })
        .collect();
    format!(r#"<nav class="site-nav" aria-label="Main navigation">{links}</nav>"#)
}

fn footer(site: &SiteConfig) -> String {
    let year = chrono::Utc::now().year();
    format!(
        concat!(
            r#"<footer class="site-footer">"#,
            r#"<p class="footer-brand">{brand}</p>"#,
            r#"<p><a href="mailto:{email_attr}">{email}</a></p>"#,
            "{socials}",
            r#"<p class="copyright">&copy; {year} {title}</p>"#,
            r#"</footer>"#
        ),
        brand = esc(&site.brand),
        email_attr = attr(&site.email),
        email = esc(&site.email),
        socials = social_icon_row(&site.socials),
        year = year,
        title = esc(&site.hero.title),
    )
}

/// Full HTML document around `body`, with the nav entry for `current_path` marked active.
pub fn render_document(site: &SiteConfig, current_path: &str, body: &str) -> String {
    let title = format!("{} · {}", page_name(current_path), site.hero.title);
    format!(
        concat!(
            "<!doctype html>\n",
            r#"<html lang="en"><head><meta charset="utf-8">"#,
            r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
            r#"<meta name="description" content="{tagline}">"#,
            "<title>{title}</title></head>",
            r#"<body><div class="shell">"#,
            r##"<a class="skip-link" href="#main-content">Skip to main content</a>"##,
            r#"<header class="site-header"><a class="brand" href="/">{brand}</a>{nav}</header>"#,
            r#"<main id="main-content">{body}</main>"#,
            "{footer}",
            "</div></body></html>"
        ),
        tagline = attr(&site.hero.tagline),
        title = esc(&title),
        brand = esc(&site.brand),
        nav = nav_bar(site, current_path),
        body = body,
        footer = footer(site),
    )
}

/// Paths that are page navigations (as opposed to APIs, redirects and assets).
pub fn is_page_path(path: &str) -> bool {
    const SKIP_PREFIXES: [&str; 3] = ["/api/", "/go/", "/static/"];
    const SKIP_EXACT: [&str; 2] = ["/metrics", "/health"];
    if SKIP_PREFIXES.iter().any(|p| path.starts_with(p)) || SKIP_EXACT.contains(&path) {
        return false;
    }
    // Asset-looking requests (favicon.ico, robots.txt) are not navigations.
    !path.rsplit('/').next().is_some_and(|seg| seg.contains('.'))
}

/// Visitor id from the `tih_vid` cookie, if well-formed.
pub fn visitor_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == VISITOR_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| (8..=64).contains(&v.len()) && v.chars().all(|c| c.is_ascii_alphanumeric()))
}

fn visitor_cookie(id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{VISITOR_COOKIE}={id}; Path=/; Max-Age={VISITOR_MAX_AGE_SECS}; SameSite=Lax; HttpOnly"
    ))
    .ok()
}

/// Assigns the visitor id and, for GET navigations, issues exactly one
/// `page_view` track carrying `{path, name}`.
pub async fn track_navigation(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let existing = visitor_from_headers(req.headers());
    let fresh = existing.is_none();
    let visitor = existing.unwrap_or_else(new_anonymous_id);
    req.extensions_mut().insert(VisitorId(visitor.clone()));

    let path = req.uri().path().to_string();
    if req.method() == Method::GET && is_page_path(&path) {
        let name = page_name(&path);
        let analytics = state.analytics_for(&visitor, &path);
        analytics.track(
            EventName::PageView,
            Some(props([("path", json!(path)), ("name", json!(name))])),
        );
        counter!("site_page_views_total").increment(1);
        tracing::debug!(%path, %name, "page view");
    }

    let mut resp = next.run(req).await;
    if fresh {
        if let Some(cookie) = visitor_cookie(&visitor) {
            resp.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    resp
}
