use crate::components::{attr, contact_form, esc, section_title};
use crate::config::SiteConfig;
use crate::forms::{ContactFields, FormState};

pub fn render(site: &SiteConfig, state: &FormState, fields: &ContactFields) -> String {
    format!(
        concat!(
            "{title}",
            r#"<section class="contact">"#,
            r#"<p class="contact-intro">Questions, collaborations or your own story: write below or email "#,
            r#"<a href="mailto:{email_attr}">{email}</a>.</p>"#,
            "{form}",
            "</section>"
        ),
        title = section_title("Contact"),
        email_attr = attr(&site.email),
        email = esc(&site.email),
        form = contact_form(state, fields),
    )
}
