use super::{attr, esc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonType {
    Button,
    Submit,
}

impl ButtonType {
    fn as_str(self) -> &'static str {
        match self {
            ButtonType::Button => "button",
            ButtonType::Submit => "submit",
        }
    }
}

/// Pill-shaped call to action rendered as a link.
pub fn pill_link(href: &str, label: &str, external: bool) -> String {
    let target = if external {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    format!(
        r#"<a class="pill-button" href="{}"{target}>{}</a>"#,
        attr(href),
        esc(label)
    )
}

/// Pill-shaped `<button>`.
pub fn pill_button(label: &str, kind: ButtonType, disabled: bool) -> String {
    let disabled = if disabled { " disabled" } else { "" };
    format!(
        r#"<button class="pill-button" type="{}"{disabled}>{}</button>"#,
        kind.as_str(),
        esc(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_and_button_variants() {
        assert_eq!(
            pill_link("/newsletter", "Subscribe", false),
            r#"<a class="pill-button" href="/newsletter">Subscribe</a>"#
        );
        assert!(pill_link("https://x", "Go", true).contains(r#"target="_blank""#));
        assert_eq!(
            pill_button("Sending...", ButtonType::Submit, true),
            r#"<button class="pill-button" type="submit" disabled>Sending...</button>"#
        );
    }
}
