use crate::components::{attr, esc, pill_link, social_icon_row};
use crate::config::SiteConfig;

/// Hero block: portrait, title, byline, tagline, subscribe call to action and socials.
pub fn render(site: &SiteConfig) -> String {
    let hero = &site.hero;
    format!(
        concat!(
            r#"<section class="hero">"#,
            r#"<div class="hero-portrait"><img src="/static/denisehome.jpeg" alt="{alt}"></div>"#,
            r#"<div class="hero-card">"#,
            r#"<h1 class="hero-title">{title}</h1>"#,
            r#"<div class="hero-byline">{byline}</div>"#,
            r#"<div class="hero-rule"></div>"#,
            r#"<p class="hero-tagline">{tagline}</p>"#,
            r#"<div class="hero-cta">{subscribe}</div>"#,
            r#"<div class="hero-connect"><div class="hero-connect-label">Connect</div>{socials}</div>"#,
            r#"</div></section>"#
        ),
        alt = attr(&format!("{}, author of {}", site.author, hero.title)),
        title = esc(&hero.title),
        byline = esc(&hero.byline),
        tagline = esc(&hero.tagline),
        subscribe = pill_link("/newsletter", "Subscribe to Newsletter", false),
        socials = social_icon_row(&site.socials),
    )
}
