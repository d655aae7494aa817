// src/config/mod.rs
//! Site content (`site`) and process settings (`settings`).

pub mod settings;
pub mod site;

pub use settings::{AnalyticsSettings, AppEnv, FormSettings, Settings};
pub use site::{Hero, NavEntry, PressItem, SiteConfig, SocialLink};
