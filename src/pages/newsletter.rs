use crate::components::{card, esc, newsletter_article_card, pill_link, section_title, substack_embed};
use crate::config::SiteConfig;
use crate::newsletter::NewsletterArticle;

/// Route that records the signup intent before leaving for Substack.
pub const SIGNUP_HREF: &str = "/go/newsletter";

/// Substack profile URL the signup button lands on.
pub fn signup_url(site: &SiteConfig) -> String {
    format!(
        "{}/?utm_campaign=profile_chips",
        site.newsletter_url.trim_end_matches('/')
    )
}

/// Subscribe card with the embedded signup widget, then the latest posts when any were fetched.
pub fn render(site: &SiteConfig, articles: &[NewsletterArticle]) -> String {
    let subscribe = card(
        "subscribe-card",
        &format!(
            concat!(
                r#"<h3>Subscribe to {title}</h3>"#,
                r#"<p>Weekly reflections on grief, migration, and art.</p>"#,
                "{embed}",
                "{signup}",
                r#"<p class="subscribe-note">Free &bull; Weekly &bull; Unsubscribe anytime</p>"#
            ),
            title = esc(&site.hero.title),
            embed = substack_embed(&site.newsletter_url),
            signup = pill_link(SIGNUP_HREF, "Subscribe on Substack", true),
        ),
    );

    let latest = if articles.is_empty() {
        String::new()
    } else {
        let cards: String = articles.iter().map(newsletter_article_card).collect();
        format!(r#"<section class="latest-posts"><h2>Latest posts</h2>{cards}</section>"#)
    };

    format!(
        concat!(
            "{heading}",
            r#"<section class="newsletter">{subscribe}"#,
            r#"<p class="written-by">Written by <a href="/about">{author}</a></p>"#,
            "</section>{latest}"
        ),
        heading = section_title("Newsletter"),
        subscribe = subscribe,
        author = esc(&site.author),
        latest = latest,
    )
}
