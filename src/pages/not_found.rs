use crate::components::{card, pill_link};

pub fn render() -> String {
    let body = format!(
        concat!(
            r#"<h1 class="not-found-code">404</h1>"#,
            r#"<h2>Page Not Found</h2>"#,
            r#"<p>The page you're looking for doesn't exist or has been moved.</p>"#,
            r#"<div class="not-found-links">{home}{about}</div>"#
        ),
        home = pill_link("/", "Go Home", false),
        about = pill_link("/about", "Learn More", false),
    );
    format!(
        r#"<section class="not-found">{}</section>"#,
        card("not-found-card", &body)
    )
}
