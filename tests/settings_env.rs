// tests/settings_env.rs
//
// Configuration read from the real process environment. These tests mutate
// env vars, so they run serially.

use std::io::Write;

use serial_test::serial;

use humanist_site::config::{settings::DEV_API_BASE_URL, AppEnv, Settings, SiteConfig};

const VARS: [&str; 6] = [
    "APP_ENV",
    "API_BASE_URL",
    "POSTHOG_API_KEY",
    "DEBUG_ROUTES",
    "STATIC_DIR",
    "SITE_CONFIG_PATH",
];

fn clear_env() {
    for v in VARS {
        std::env::remove_var(v);
    }
}

#[test]
#[serial]
fn from_env_follows_api_base_rule() {
    clear_env();
    std::env::set_var("APP_ENV", "production");
    assert_eq!(Settings::from_env().api_base_url(), "");

    std::env::set_var("APP_ENV", "development");
    let s = Settings::from_env();
    assert_eq!(s.env, AppEnv::Development);
    assert_eq!(s.api_base_url(), DEV_API_BASE_URL);

    std::env::set_var("API_BASE_URL", "https://api.example.com/");
    assert_eq!(Settings::from_env().api_base_url(), "https://api.example.com");
    clear_env();
}

#[test]
#[serial]
fn blank_analytics_key_disables_analytics() {
    clear_env();
    std::env::set_var("POSTHOG_API_KEY", "   ");
    let s = Settings::from_env();
    assert!(s.analytics.api_key.is_none());
    assert!(humanist_site::analytics::init_provider(&s.analytics).is_none());
    clear_env();
}

#[test]
#[serial]
fn site_config_path_overrides_embedded_copy() {
    clear_env();
    let embedded = SiteConfig::embedded().unwrap();
    let raw = include_str!("../config/site.toml").replace(
        &format!("brand = \"{}\"", embedded.brand),
        "brand = \"Staging Humanist\"",
    );
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(raw.as_bytes()).unwrap();

    std::env::set_var("SITE_CONFIG_PATH", file.path());
    let site = SiteConfig::load_default().unwrap();
    assert_eq!(site.brand, "Staging Humanist");
    assert_eq!(site.socials.len(), embedded.socials.len());

    std::env::set_var("SITE_CONFIG_PATH", "/nonexistent/site.toml");
    assert!(SiteConfig::load_default().is_err());
    clear_env();
}
