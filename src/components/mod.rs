//! Stateless HTML building blocks. Every function is a pure mapping from its
//! arguments to markup; all interpolated text goes through [`esc`] or [`attr`].

use std::borrow::Cow;

pub mod article;
pub mod button;
pub mod card;
pub mod contact;
pub mod embed;
pub mod press;
pub mod section_title;
pub mod social;

pub use article::{format_display_date, newsletter_article_card};
pub use button::{pill_button, pill_link, ButtonType};
pub use card::card;
pub use contact::contact_form;
pub use embed::substack_embed;
pub use press::press_item_card;
pub use section_title::section_title;
pub use social::{social_icon_link, social_icon_row};

/// Escape element text.
pub fn esc(s: &str) -> Cow<'_, str> {
    html_escape::encode_text(s)
}

/// Escape a double-quoted attribute value.
pub fn attr(s: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(s)
}

/// Arrow used by the "read more" calls to action.
pub(crate) const CHEVRON_SVG: &str = r#"<svg class="chevron" fill="none" viewBox="0 0 24 24" stroke="currentColor" stroke-width="2.5" aria-hidden="true"><path stroke-linecap="round" stroke-linejoin="round" d="M9 5l7 7-7 7"/></svg>"#;
