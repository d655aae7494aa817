// src/config/site.rs
//! Immutable site content: brand strings, navigation, socials, press and hero copy.
//!
//! Loaded once at boot and shared read-only behind an `Arc`. Every field is
//! required; a missing key is a load error rather than a silent default.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_SITE_CONFIG_PATH: &str = "SITE_CONFIG_PATH";

/// Compiled-in copy of `config/site.toml`, used when no override path is set.
const EMBEDDED_SITE_TOML: &str = include_str!("../../config/site.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub label: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Stable key used in `/go/social/{platform}` and for icon lookup.
    pub platform: String,
    /// Human label, also sent as the `platform` analytics property.
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PressItem {
    pub outlet: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub title: String,
    pub byline: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub brand: String,
    pub author: String,
    pub email: String,
    pub newsletter_url: String,
    /// Display order = declaration order.
    pub nav: Vec<NavEntry>,
    pub socials: Vec<SocialLink>,
    pub press: Vec<PressItem>,
    pub hero: Hero,
}

impl SiteConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: SiteConfig = toml::from_str(s).context("parsing site config toml")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading site config from {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("loading site config from {}", path.display()))
    }

    /// `$SITE_CONFIG_PATH` if set, otherwise the embedded default.
    pub fn load_default() -> Result<Self> {
        match std::env::var(ENV_SITE_CONFIG_PATH) {
            Ok(p) if !p.trim().is_empty() => {
                let pb = PathBuf::from(p);
                tracing::info!(path = %pb.display(), "loading site config override");
                Self::load_from_file(&pb)
            }
            _ => Self::embedded(),
        }
    }

    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_SITE_TOML).context("embedded site config")
    }

    pub fn validate(&self) -> Result<()> {
        if self.brand.trim().is_empty() {
            bail!("site config: brand must not be empty");
        }
        if self.nav.is_empty() {
            bail!("site config: nav must list at least one entry");
        }
        for entry in &self.nav {
            if !entry.path.starts_with('/') {
                bail!(
                    "site config: nav path '{}' for '{}' must start with '/'",
                    entry.path,
                    entry.label
                );
            }
        }
        let mut seen = HashSet::new();
        for s in &self.socials {
            if !seen.insert(s.platform.to_ascii_lowercase()) {
                bail!("site config: duplicate social platform '{}'", s.platform);
            }
        }
        Ok(())
    }

    pub fn social(&self, platform: &str) -> Option<&SocialLink> {
        self.socials
            .iter()
            .find(|s| s.platform.eq_ignore_ascii_case(platform))
    }

    pub fn press_item(&self, index: usize) -> Option<&PressItem> {
        self.press.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_config_loads_and_keeps_nav_order() {
        let cfg = SiteConfig::embedded().unwrap();
        assert_eq!(cfg.brand, "THE INCURABLE HUMANIST");
        let paths: Vec<_> = cfg.nav.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(paths, vec!["/about", "/newsletter", "/press", "/contact"]);
        assert_eq!(cfg.press.len(), 3);
        assert_eq!(
            cfg.social("instagram").map(|s| s.url.as_str()),
            Some("https://www.instagram.com/theincurablehumanist/")
        );
        assert_eq!(cfg.social("X").map(|s| s.label.as_str()), Some("X (Twitter)"));
    }

    #[test]
    fn missing_field_is_a_load_error() {
        let toml = r#"
brand = "B"
email = "a@b.c"
newsletter_url = "https://x.substack.com"
nav = [{ label = "A", path = "/a" }]
socials = []
press = []
[hero]
title = "t"
byline = "b"
tagline = "g"
"#;
        // `author` is absent.
        assert!(SiteConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn nav_path_without_slash_is_rejected() {
        let mut cfg = SiteConfig::embedded().unwrap();
        cfg.nav[0].path = "about".into();
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("must start with '/'"), "{err}");
    }

    #[test]
    fn duplicate_social_platform_is_rejected() {
        let mut cfg = SiteConfig::embedded().unwrap();
        let dup = cfg.socials[0].clone();
        cfg.socials.push(dup);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn duplicate_platform_check_ignores_case() {
        let mut cfg = SiteConfig::embedded().unwrap();
        let mut dup = cfg.socials[0].clone();
        dup.platform = dup.platform.to_ascii_uppercase();
        cfg.socials.push(dup);
        let err = cfg.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate social platform"), "{err}");
    }
}
