use chrono::{DateTime, NaiveDate};

use super::{attr, card, esc, CHEVRON_SVG};
use crate::newsletter::NewsletterArticle;

/// Long-form US date ("January 5, 2025") for a feed or ISO date string.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 and RFC 2822. The calendar date is taken as
/// written, without shifting into another zone. Unparsable input comes back unchanged.
pub fn format_display_date(raw: &str) -> String {
    let s = raw.trim();
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        .or_else(|| DateTime::parse_from_rfc2822(s).ok().map(|d| d.date_naive()));
    match date {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

pub fn newsletter_article_card(article: &NewsletterArticle) -> String {
    let link = attr(&article.link);
    let body = format!(
        concat!(
            r#"<div class="quote-mark" aria-hidden="true">&ldquo;</div>"#,
            r#"<div class="article-body">"#,
            r#"<div class="article-date">{date}</div>"#,
            r#"<a href="{link}" target="_blank" rel="noopener noreferrer"><h3>{title}</h3></a>"#,
            r#"<p class="article-description">{description}</p>"#,
            r#"<div class="article-cta"><a href="{link}" target="_blank" rel="noopener noreferrer" aria-label="Read &quot;{title_attr}&quot; on Substack">"#,
            r#"<span>Read on Substack</span>{chevron}</a></div>"#,
            r#"</div>"#
        ),
        date = esc(&format_display_date(&article.published)),
        link = link,
        title = esc(&article.title),
        description = esc(&article.description),
        title_attr = attr(&article.title),
        chevron = CHEVRON_SVG,
    );
    card("article-card", &body)
}
