use crate::components::{press_item_card, section_title};
use crate::config::SiteConfig;

/// Tracked link for the clipping at `index`.
pub fn press_click_href(index: usize) -> String {
    format!("/go/press/{index}")
}

pub fn render(site: &SiteConfig) -> String {
    let cards: String = site
        .press
        .iter()
        .enumerate()
        .map(|(i, item)| press_item_card(item, &press_click_href(i)))
        .collect();
    format!(
        r#"{}<section class="press-grid">{cards}</section>"#,
        section_title("Press")
    )
}
