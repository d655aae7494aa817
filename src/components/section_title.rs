use super::esc;

pub fn section_title(text: &str) -> String {
    format!(
        r#"<div class="section-title"><h1>{}</h1><div class="section-rule"></div></div>"#,
        esc(text)
    )
}
