//! Analytics façade: a narrow, fire-and-forget call surface over a product-analytics client.
//!
//! Handlers talk to [`Analytics`]; the network-backed provider sits behind the
//! [`AnalyticsClient`] capability so tests can swap in [`MemoryAnalytics`].
//! No buffering and no retries happen at this layer. When no client is configured
//! every call is a no-op.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use metrics::counter;
use serde_json::{json, Map, Value};
use sha2::{Digest, Sha256};

use crate::config::AnalyticsSettings;

pub mod memory;
pub mod posthog;

pub use memory::{MemoryAnalytics, RecordedCall};
pub use posthog::PostHogClient;

/// Open key/value event properties.
pub type Properties = Map<String, Value>;

/// Fixed event names shared with the analytics dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    PageView,
    ContactFormSubmit,
    ContactFormError,
    NewsletterSignup,
    ExternalLinkClick,
    SocialLinkClick,
    PressArticleClick,
    SectionView,
    ScrollToBottom,
}

impl EventName {
    pub const fn as_str(self) -> &'static str {
        match self {
            EventName::PageView => "page_view",
            EventName::ContactFormSubmit => "contact_form_submit",
            EventName::ContactFormError => "contact_form_error",
            EventName::NewsletterSignup => "newsletter_signup",
            EventName::ExternalLinkClick => "external_link_click",
            EventName::SocialLinkClick => "social_link_click",
            EventName::PressArticleClick => "press_article_click",
            EventName::SectionView => "section_view",
            EventName::ScrollToBottom => "scroll_to_bottom",
        }
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Provider-reserved event names.
pub const PAGEVIEW_EVENT: &str = "$pageview";
pub const EXCEPTION_EVENT: &str = "$exception";

/// The third-party collaborator. Calls must return promptly; delivery is the
/// implementation's business and its failures never reach the caller.
pub trait AnalyticsClient: Send + Sync {
    fn capture(&self, distinct_id: &str, event: &str, properties: Properties);
    fn identify(&self, distinct_id: &str, anon_distinct_id: &str, traits: Properties);
    fn reset(&self, distinct_id: &str);
    fn people_set(&self, distinct_id: &str, properties: Properties);
    fn provider_name(&self) -> &'static str;
}

pub type DynAnalyticsClient = Arc<dyn AnalyticsClient>;

/// Initialise the analytics provider once at startup.
///
/// Never fails: a missing key or a client build error leaves analytics disabled.
pub fn init_provider(settings: &AnalyticsSettings) -> Option<DynAnalyticsClient> {
    let Some(key) = settings.api_key.as_deref() else {
        tracing::info!("analytics disabled (no POSTHOG_API_KEY)");
        return None;
    };
    match PostHogClient::new(key, &settings.api_host, settings.debug) {
        Ok(client) => {
            tracing::info!(
                host = %settings.api_host,
                capture_exceptions = settings.capture_exceptions,
                debug = settings.debug,
                "analytics provider initialised"
            );
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = ?e, "analytics init failed; continuing without analytics");
            None
        }
    }
}

/// Per-visitor façade handed to handlers.
#[derive(Clone)]
pub struct Analytics {
    client: Option<DynAnalyticsClient>,
    distinct_id: String,
    page_url: Option<String>,
}

impl Analytics {
    pub fn new(client: Option<DynAnalyticsClient>, distinct_id: impl Into<String>) -> Self {
        Self {
            client,
            distinct_id: distinct_id.into(),
            page_url: None,
        }
    }

    pub fn disabled() -> Self {
        Self::new(None, new_anonymous_id())
    }

    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub fn distinct_id(&self) -> &str {
        &self.distinct_id
    }

    pub fn track(&self, event: impl AsRef<str>, properties: Option<Properties>) {
        let Some(client) = &self.client else {
            return;
        };
        let event = event.as_ref();
        counter!("site_analytics_events_total").increment(1);
        client.capture(&self.distinct_id, event, properties.unwrap_or_default());
    }

    /// Attach future events to `user_id`.
    pub fn identify(&mut self, user_id: &str, traits: Option<Properties>) {
        let Some(client) = &self.client else {
            return;
        };
        counter!("site_analytics_events_total").increment(1);
        client.identify(user_id, &self.distinct_id, traits.unwrap_or_default());
        self.distinct_id = user_id.to_string();
    }

    /// Forget the current identity and continue under a fresh anonymous id.
    pub fn reset(&mut self) {
        let Some(client) = &self.client else {
            return;
        };
        client.reset(&self.distinct_id);
        self.distinct_id = new_anonymous_id();
    }

    pub fn set_user_properties(&self, properties: Properties) {
        let Some(client) = &self.client else {
            return;
        };
        counter!("site_analytics_events_total").increment(1);
        client.people_set(&self.distinct_id, properties);
    }

    pub fn page_view(&self, page_name: Option<&str>) {
        let mut props = Properties::new();
        props.insert("page_name".into(), json!(page_name));
        props.insert("page_url".into(), json!(self.page_url));
        self.track(PAGEVIEW_EVENT, Some(props));
    }
}

/// Build a property map from `(key, value)` pairs.
pub fn props<I, K>(pairs: I) -> Properties
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// Anonymous distinct id: sha256 over clock, pid and a process-wide counter, 32 hex chars.
pub fn new_anonymous_id() -> String {
    static SEQ: AtomicU64 = AtomicU64::new(0);
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();

    let mut hasher = Sha256::new();
    hasher.update(nanos.to_le_bytes());
    hasher.update(std::process::id().to_le_bytes());
    hasher.update(seq.to_le_bytes());
    hex_prefix(&hasher.finalize(), 16)
}

/// Short hash used when an id has to appear in logs.
pub fn anon_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex_prefix(&hasher.finalize(), 6)
}

fn hex_prefix(digest: &[u8], bytes: usize) -> String {
    use std::fmt::Write as _;
    let mut out = String::with_capacity(bytes * 2);
    for b in digest.iter().take(bytes) {
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}
