use anyhow::{Context, Result};
use metrics::counter;
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;

use super::{AnalyticsClient, Properties};

const LIB_NAME: &str = "humanist-site";

/// PostHog capture API client. Each call is handed to a background task and
/// forgotten: at most one delivery attempt, no queue, no retry.
#[derive(Clone)]
pub struct PostHogClient {
    http: Client,
    api_key: String,
    capture_url: String,
    debug: bool,
}

#[derive(Debug, Serialize)]
struct CapturePayload {
    api_key: String,
    event: String,
    distinct_id: String,
    properties: Properties,
    timestamp: String,
}

impl PostHogClient {
    pub fn new(api_key: &str, api_host: &str, debug: bool) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("humanist-site/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(3))
            .timeout(Duration::from_secs(5))
            .build()
            .context("building analytics http client")?;
        Ok(Self {
            http,
            api_key: api_key.to_string(),
            capture_url: format!("{}/capture/", api_host.trim_end_matches('/')),
            debug,
        })
    }

    pub fn capture_url(&self) -> &str {
        &self.capture_url
    }

    fn payload(&self, distinct_id: &str, event: &str, mut properties: Properties) -> CapturePayload {
        properties
            .entry("$lib")
            .or_insert_with(|| Value::String(LIB_NAME.to_string()));
        CapturePayload {
            api_key: self.api_key.clone(),
            event: event.to_string(),
            distinct_id: distinct_id.to_string(),
            properties,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn dispatch(&self, payload: CapturePayload) {
        if self.debug {
            tracing::info!(event = %payload.event, "analytics capture");
        }
        let Ok(rt) = tokio::runtime::Handle::try_current() else {
            tracing::debug!(event = %payload.event, "no async runtime; analytics event dropped");
            return;
        };
        let http = self.http.clone();
        let url = self.capture_url.clone();
        rt.spawn(async move {
            let res = http
                .post(&url)
                .json(&payload)
                .send()
                .await
                .and_then(|r| r.error_for_status());
            if let Err(e) = res {
                tracing::debug!(error = %e, event = %payload.event, "analytics delivery failed");
                counter!("site_analytics_delivery_errors_total").increment(1);
            }
        });
    }
}

impl AnalyticsClient for PostHogClient {
    fn capture(&self, distinct_id: &str, event: &str, properties: Properties) {
        let payload = self.payload(distinct_id, event, properties);
        self.dispatch(payload);
    }

    fn identify(&self, distinct_id: &str, anon_distinct_id: &str, traits: Properties) {
        let mut props = Properties::new();
        props.insert("$anon_distinct_id".into(), json!(anon_distinct_id));
        props.insert("$set".into(), Value::Object(traits));
        let payload = self.payload(distinct_id, "$identify", props);
        self.dispatch(payload);
    }

    fn reset(&self, _distinct_id: &str) {
        // Identity lives with the caller; the capture API keeps no session to clear.
        if self.debug {
            tracing::info!("analytics reset");
        }
    }

    fn people_set(&self, distinct_id: &str, properties: Properties) {
        let mut props = Properties::new();
        props.insert("$set".into(), Value::Object(properties));
        let payload = self.payload(distinct_id, "$set", props);
        self.dispatch(payload);
    }

    fn provider_name(&self) -> &'static str {
        "posthog"
    }
}
