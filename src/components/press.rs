use super::{attr, card, esc, CHEVRON_SVG};
use crate::config::PressItem;

/// Clipping card. `href` is where the title and call to action point.
pub fn press_item_card(item: &PressItem, href: &str) -> String {
    let href = attr(href);
    let body = format!(
        concat!(
            r#"<div class="quote-mark" aria-hidden="true">&ldquo;</div>"#,
            r#"<div class="press-body">"#,
            r#"<div class="press-outlet">{outlet}</div>"#,
            r#"<a href="{href}" target="_blank" rel="noopener noreferrer"><h3>{title}</h3></a>"#,
            r#"<p class="press-dek">{dek}</p>"#,
            r#"<div class="press-cta"><a href="{href}" target="_blank" rel="noopener noreferrer" aria-label="Read &quot;{title_attr}&quot; on {outlet_attr}">"#,
            r#"<span>Read Article</span>{chevron}</a></div>"#,
            r#"</div>"#
        ),
        outlet = esc(&item.outlet),
        href = href,
        title = esc(&item.title),
        dek = esc(&item.description),
        title_attr = attr(&item.title),
        outlet_attr = attr(&item.outlet),
        chevron = CHEVRON_SVG,
    );
    card("press-card", &body)
}
