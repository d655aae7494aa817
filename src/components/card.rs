use super::attr;

/// Surface container. `children` is already-rendered markup.
pub fn card(class: &str, children: &str) -> String {
    let class = class.trim();
    if class.is_empty() {
        format!(r#"<div class="card">{children}</div>"#)
    } else {
        format!(r#"<div class="card {}">{children}</div>"#, attr(class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_children_and_merges_class() {
        assert_eq!(card("", "<p>x</p>"), r#"<div class="card"><p>x</p></div>"#);
        assert_eq!(
            card(" wide ", "y"),
            r#"<div class="card wide">y</div>"#
        );
    }
}
