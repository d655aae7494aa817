// src/lib.rs
// Public library surface for the binary and the integration tests.

pub mod analytics;
pub mod components;
pub mod config;
pub mod embed;
pub mod forms;
pub mod newsletter;
pub mod pages;
pub mod routes;
pub mod shell;
pub mod state;
pub mod telemetry;

pub use crate::routes::router;
pub use crate::state::AppState;

use anyhow::Context;
use axum::Router;
use tracing::info;

use crate::config::{Settings, SiteConfig};

/// Build the full application from an already loaded site config and settings.
pub fn build_app(site: SiteConfig, settings: Settings) -> anyhow::Result<Router> {
    let state = AppState::from_settings(site, settings).context("building app state")?;
    Ok(router(state))
}

/// Load configuration from the environment and build the router the binary serves.
pub async fn app() -> anyhow::Result<Router> {
    let site = SiteConfig::load_default().context("loading site config")?;
    let settings = Settings::from_env();
    info!(
        env = ?settings.env,
        api_base = %settings.api_base_url(),
        static_dir = %settings.static_dir,
        debug_routes = settings.debug_routes,
        "configuration loaded"
    );
    build_app(site, settings)
}
