use super::attr;
use crate::embed::embed_url;

/// Substack signup widget in an isolated frame.
pub fn substack_embed(newsletter_url: &str) -> String {
    format!(
        concat!(
            r#"<div class="substack-embed">"#,
            r#"<iframe src="{src}" width="100%" height="320" style="border:1px solid #EEE;background:white" "#,
            r#"frameborder="0" scrolling="no" title="Substack Newsletter Signup"></iframe>"#,
            r#"</div>"#
        ),
        src = attr(&embed_url(newsletter_url)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_points_at_embed_url() {
        let html = substack_embed("https://theincurablehumanist.substack.com");
        assert!(html.contains(r#"src="https://theincurablehumanist.substack.com/embed""#));
        let html = substack_embed("::::");
        assert!(html.contains(r#"src="https://yourname.substack.com/embed""#));
    }
}
