//! Prometheus exposition for the site's counters, mounted at `/metrics` when
//! debug routes are enabled.

use axum::{routing::get, Router};
use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

#[derive(Clone)]
pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the process-wide Prometheus recorder.
    ///
    /// The recorder is global, so repeated calls (one per app built in tests)
    /// hand back the first handle.
    pub fn init() -> anyhow::Result<Self> {
        static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();
        let handle = HANDLE.get_or_try_init(|| {
            let handle = PrometheusBuilder::new().install_recorder()?;
            describe();
            Ok::<_, anyhow::Error>(handle)
        })?;
        Ok(Self {
            handle: handle.clone(),
        })
    }

    /// Returns a router exposing `/metrics` in the Prometheus text format.
    pub fn router<S>(&self) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

fn describe() {
    describe_counter!("site_page_views_total", "Page navigations tracked.");
    describe_counter!(
        "site_contact_submissions_total",
        "Contact form submissions by outcome."
    );
    describe_counter!("site_analytics_events_total", "Analytics calls issued.");
    describe_counter!(
        "site_analytics_delivery_errors_total",
        "Analytics deliveries that failed in the background."
    );
    describe_counter!("site_feed_errors_total", "Newsletter feed fetch or parse failures.");
    describe_counter!("site_redirects_total", "Tracked outbound redirects by kind.");
}
