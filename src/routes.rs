//! HTTP surface: page routes, the contact form relay, tracked outbound
//! redirects and the newsletter JSON endpoints.

use std::any::Any;

use axum::{
    extract::{Path, State},
    http::{StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use metrics::counter;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir};

use crate::analytics::{props, Analytics, EventName, EXCEPTION_EVENT};
use crate::components::{card, pill_link};
use crate::forms::{ContactFields, ContactForm, FormState};
use crate::newsletter::{ArticlesResponse, FeedError};
use crate::pages;
use crate::shell::{render_document, track_navigation};
use crate::state::AppState;
use crate::telemetry::Metrics;

/// Every navigable page, in nav order after the home page.
pub const PAGE_ROUTES: [&str; 5] = ["/", "/about", "/newsletter", "/press", "/contact"];

/// Distinct id for events raised by the server itself.
const SERVER_DISTINCT_ID: &str = "server";

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/newsletter/articles", get(api_articles))
        .route("/api/newsletter/health", get(api_health))
        .layer(CorsLayer::very_permissive());

    let mut app = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/press", get(press))
        .route("/newsletter", get(newsletter))
        .route("/contact", get(contact_page).post(contact_submit))
        .route("/go/social/{platform}", get(go_social))
        .route("/go/press/{index}", get(go_press))
        .route("/go/newsletter", get(go_newsletter))
        .route("/health", get(|| async { "OK" }))
        .merge(api)
        .nest_service("/static", ServeDir::new(&state.settings.static_dir))
        .fallback(not_found);

    if state.settings.debug_routes {
        match Metrics::init() {
            Ok(m) => app = app.merge(m.router()),
            Err(e) => tracing::warn!(error = ?e, "metrics recorder unavailable; /metrics disabled"),
        }
    }

    let panics = panic_responder(&state);
    app.layer(middleware::from_fn_with_state(state.clone(), track_navigation))
        .layer(CatchPanicLayer::custom(panics))
        .with_state(state)
}

fn page(state: &AppState, path: &str, body: &str) -> Html<String> {
    Html(render_document(&state.site, path, body))
}

async fn home(State(state): State<AppState>) -> Html<String> {
    page(&state, "/", &pages::home::render(&state.site))
}

async fn about(State(state): State<AppState>) -> Html<String> {
    page(&state, "/about", &pages::about::render(&state.site))
}

async fn press(State(state): State<AppState>) -> Html<String> {
    page(&state, "/press", &pages::press::render(&state.site))
}

async fn newsletter(State(state): State<AppState>) -> Html<String> {
    let articles = match state.articles.fetch_articles().await {
        Ok(a) => a,
        Err(e) => {
            tracing::warn!(error = ?e, source = %state.articles.origin(), "newsletter articles unavailable");
            Vec::new()
        }
    };
    page(&state, "/newsletter", &pages::newsletter::render(&state.site, &articles))
}

async fn contact_page(State(state): State<AppState>) -> Html<String> {
    let form = ContactForm::new();
    page(
        &state,
        "/contact",
        &pages::contact::render(&state.site, form.state(), form.fields()),
    )
}

async fn contact_submit(
    State(state): State<AppState>,
    mut analytics: Analytics,
    Form(fields): Form<ContactFields>,
) -> Response {
    let mut form = ContactForm::new();
    form.submit(state.forms.as_ref(), &mut analytics, fields).await;

    let status = match form.state() {
        FormState::Failed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::OK,
    };
    let body = pages::contact::render(&state.site, form.state(), form.fields());
    (status, page(&state, "/contact", &body)).into_response()
}

async fn go_social(
    State(state): State<AppState>,
    analytics: Analytics,
    Path(platform): Path<String>,
    uri: Uri,
) -> Response {
    let Some(link) = state.site.social(&platform) else {
        return not_found(State(state), uri).await;
    };
    analytics.track(
        EventName::SocialLinkClick,
        Some(props([
            ("platform", json!(link.label)),
            ("url", json!(link.url)),
        ])),
    );
    counter!("site_redirects_total", "kind" => "social").increment(1);
    Redirect::to(&link.url).into_response()
}

async fn go_press(
    State(state): State<AppState>,
    analytics: Analytics,
    Path(index): Path<String>,
    uri: Uri,
) -> Response {
    let Some(item) = index.parse().ok().and_then(|i| state.site.press_item(i)) else {
        return not_found(State(state), uri).await;
    };
    analytics.track(
        EventName::PressArticleClick,
        Some(props([
            ("outlet", json!(item.outlet)),
            ("title", json!(item.title)),
            ("url", json!(item.url)),
        ])),
    );
    counter!("site_redirects_total", "kind" => "press").increment(1);
    Redirect::to(&item.url).into_response()
}

async fn go_newsletter(State(state): State<AppState>, analytics: Analytics) -> Redirect {
    let url = pages::newsletter::signup_url(&state.site);
    analytics.track(EventName::NewsletterSignup, Some(props([("url", json!(url))])));
    counter!("site_redirects_total", "kind" => "newsletter").increment(1);
    Redirect::to(&url)
}

/// Client-facing reason for a failed article fetch. Feed parse and empty-feed
/// failures keep their own wording; anything else gets a generic prefix.
fn articles_failure_detail(e: &anyhow::Error) -> String {
    match e.downcast_ref::<FeedError>() {
        Some(feed) => feed.to_string(),
        None => format!("Unable to fetch newsletter articles: {e:#}"),
    }
}

async fn api_articles(State(state): State<AppState>) -> Response {
    match state.feed.fetch_articles().await {
        Ok(articles) => Json(ArticlesResponse::from(articles)).into_response(),
        Err(e) => {
            tracing::warn!(error = ?e, "article endpoint failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "detail": articles_failure_detail(&e) })),
            )
                .into_response()
        }
    }
}

async fn api_health(State(state): State<AppState>) -> Response {
    let feed_url = state.feed.origin();
    match state.feed.check_health().await {
        Ok(health) => Json(json!({
            "status": "healthy",
            "feed_url": feed_url,
            "article_count": health.article_count,
            "feed_title": health.title.as_deref().unwrap_or("Unknown"),
        }))
        .into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "message": format!("{e:#}"),
                "feed_url": feed_url,
            })),
        )
            .into_response(),
    }
}

async fn not_found(State(state): State<AppState>, uri: Uri) -> Response {
    (
        StatusCode::NOT_FOUND,
        page(&state, uri.path(), &pages::not_found::render()),
    )
        .into_response()
}

/// Turns a handler panic into a 500 page, reporting it as `$exception` when enabled.
pub(crate) fn panic_responder(
    state: &AppState,
) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone + Send + Sync + 'static {
    let site = state.site.clone();
    let reporter = state
        .settings
        .analytics
        .capture_exceptions
        .then(|| state.analytics.clone())
        .flatten();

    move |err: Box<dyn Any + Send + 'static>| {
        let message = err
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| err.downcast_ref::<&str>().copied())
            .unwrap_or("unknown panic");
        tracing::error!(panic = %message, "handler panicked");

        if let Some(client) = &reporter {
            Analytics::new(Some(client.clone()), SERVER_DISTINCT_ID).track(
                EXCEPTION_EVENT,
                Some(props([
                    ("$exception_type", json!("panic")),
                    ("$exception_message", json!(message)),
                ])),
            );
        }

        let body = card(
            "not-found-card",
            &format!(
                "<h1>Something went wrong</h1><p>Please try again in a moment.</p>{}",
                pill_link("/", "Go Home", false)
            ),
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(render_document(&site, "/", &body)),
        )
            .into_response()
    }
}
