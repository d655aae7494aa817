// src/config/settings.rs
//! Process settings resolved from the environment (`.env` is honoured via dotenvy in main).

use crate::config::site::SiteConfig;

pub const DEFAULT_POSTHOG_HOST: &str = "https://us.i.posthog.com";
pub const DEFAULT_FORMSPREE_ENDPOINT: &str = "https://formspree.io/f";
pub const DEFAULT_FORMSPREE_FORM_ID: &str = "xldplgoz";
pub const DEV_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_STATIC_DIR: &str = "public";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    /// `APP_ENV` wins; otherwise the build mode decides.
    fn resolve(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(v) if matches!(v.as_str(), "production" | "prod") => AppEnv::Production,
            Some(v) if matches!(v.as_str(), "development" | "dev" | "local") => {
                AppEnv::Development
            }
            _ if cfg!(debug_assertions) => AppEnv::Development,
            _ => AppEnv::Production,
        }
    }

    pub fn is_production(self) -> bool {
        self == AppEnv::Production
    }
}

/// Analytics provider initialisation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// `None` disables analytics entirely.
    pub api_key: Option<String>,
    pub api_host: String,
    pub capture_exceptions: bool,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    pub endpoint: String,
    pub form_id: String,
}

impl FormSettings {
    pub fn submit_url(&self) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), self.form_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub env: AppEnv,
    api_base_override: Option<String>,
    pub analytics: AnalyticsSettings,
    pub forms: FormSettings,
    feed_url_override: Option<String>,
    pub static_dir: String,
    pub debug_routes: bool,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an arbitrary key lookup, so tests don't have to touch process env.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let env = AppEnv::resolve(non_empty("APP_ENV").as_deref());

        let analytics = AnalyticsSettings {
            api_key: non_empty("POSTHOG_API_KEY"),
            api_host: non_empty("POSTHOG_HOST").unwrap_or_else(|| DEFAULT_POSTHOG_HOST.to_string()),
            capture_exceptions: non_empty("ANALYTICS_CAPTURE_EXCEPTIONS")
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            debug: non_empty("ANALYTICS_DEBUG")
                .map(|v| parse_flag(&v))
                .unwrap_or(cfg!(debug_assertions)),
        };

        let forms = FormSettings {
            endpoint: non_empty("FORMSPREE_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_FORMSPREE_ENDPOINT.to_string()),
            form_id: non_empty("FORMSPREE_FORM_ID")
                .unwrap_or_else(|| DEFAULT_FORMSPREE_FORM_ID.to_string()),
        };

        Self {
            env,
            api_base_override: get("API_BASE_URL").map(|v| v.trim().to_string()),
            analytics,
            forms,
            feed_url_override: non_empty("NEWSLETTER_FEED_URL"),
            static_dir: non_empty("STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            debug_routes: non_empty("DEBUG_ROUTES")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Base URL of the newsletter article API:
    /// explicit override, else same-origin (`""`) in production, else the local dev host.
    pub fn api_base_url(&self) -> String {
        if let Some(explicit) = &self.api_base_override {
            return explicit.trim_end_matches('/').to_string();
        }
        if self.env.is_production() {
            String::new()
        } else {
            DEV_API_BASE_URL.to_string()
        }
    }

    /// Substack RSS feed, defaulting to `{newsletter_url}/feed`.
    pub fn feed_url(&self, site: &SiteConfig) -> String {
        self.feed_url_override
            .clone()
            .unwrap_or_else(|| format!("{}/feed", site.newsletter_url.trim_end_matches('/')))
    }
}

fn parse_flag(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
