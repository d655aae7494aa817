//! Substack embed URL derivation.

use reqwest::Url;

/// Token used when the configured URL can't be parsed.
pub const FALLBACK_SUBDOMAIN: &str = "yourname";

const SUBSTACK_SUFFIX: &str = ".substack.com";

/// `https://name.substack.com` -> `name`. Custom domains yield their whole host;
/// anything unparsable yields [`FALLBACK_SUBDOMAIN`].
pub fn substack_subdomain(root_url: &str) -> String {
    let host = match Url::parse(root_url.trim()) {
        Ok(u) => u.host_str().map(str::to_string),
        Err(_) => None,
    };
    let Some(host) = host.filter(|h| !h.is_empty()) else {
        return FALLBACK_SUBDOMAIN.to_string();
    };
    match host.find(SUBSTACK_SUFFIX) {
        Some(idx) if idx > 0 => host[..idx].to_string(),
        Some(_) => FALLBACK_SUBDOMAIN.to_string(),
        None => host,
    }
}

pub fn embed_url(root_url: &str) -> String {
    format!("https://{}.substack.com/embed", substack_subdomain(root_url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substack_host_maps_to_embed() {
        assert_eq!(
            embed_url("https://theincurablehumanist.substack.com"),
            "https://theincurablehumanist.substack.com/embed"
        );
        assert_eq!(
            embed_url("https://theincurablehumanist.substack.com/?utm_campaign=x"),
            "https://theincurablehumanist.substack.com/embed"
        );
    }

    #[test]
    fn unparsable_url_falls_back() {
        assert_eq!(embed_url("not a url"), "https://yourname.substack.com/embed");
        assert_eq!(embed_url(""), "https://yourname.substack.com/embed");
    }

    #[test]
    fn custom_domain_keeps_whole_host() {
        assert_eq!(substack_subdomain("https://newsletter.example.com"), "newsletter.example.com");
    }
}
