//! HTML escaping and link detection
//!
//! Every piece of service-derived text placed into report markup passes
//! through `escape` first. `linkify` runs on already-escaped text and is the
//! only place that inserts raw markup, so its output must never be escaped
//! again.

use once_cell::sync::Lazy;
use regex::Regex;

/// Replace HTML-significant characters with named entities in a single
/// left-to-right pass.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

static LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://[^\s)]+)|(\bwww\.[^\s)]+)").unwrap());

/// Wrap URL-looking tokens in anchors opening in a new browsing context.
///
/// Matching is leftmost-first and non-overlapping. `www.` matches get an
/// `http://` prefix on the href only; the visible text stays as matched.
/// The input must already be escaped.
pub fn linkify(s: &str) -> String {
    LINK_RE
        .replace_all(s, |caps: &regex::Captures| {
            let url = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
            let href = if url.starts_with("http") {
                url.to_string()
            } else {
                format!("http://{}", url)
            };
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                href, url
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_passthrough_on_safe_text() {
        let s = "plain text, no markup here";
        assert_eq!(escape(s), s);
    }

    #[test]
    fn test_escape_all_significant_chars() {
        assert_eq!(escape("<a>&\"'"), "&lt;a&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_escape_single_pass() {
        // An ampersand already part of an entity is escaped again, not left
        // alone. Escaping is a plain character substitution.
        assert_eq!(escape("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_linkify_http_url() {
        let out = linkify("see https://example.com/page for details");
        assert!(out.contains(
            "<a href=\"https://example.com/page\" target=\"_blank\" rel=\"noopener noreferrer\">https://example.com/page</a>"
        ));
    }

    #[test]
    fn test_linkify_www_gets_http_prefix() {
        let out = linkify("visit www.example.com today");
        assert!(out.contains("href=\"http://www.example.com\""));
        assert!(out.contains(">www.example.com</a>"));
    }

    #[test]
    fn test_linkify_stops_at_closing_paren() {
        let out = linkify("(https://example.com/a) and more");
        assert!(out.contains(">https://example.com/a</a>"));
        assert!(!out.contains("a)</a>"));
    }

    #[test]
    fn test_linkify_no_urls_unchanged() {
        let s = "nothing to link here";
        assert_eq!(linkify(s), s);
    }

    #[test]
    fn test_escape_then_linkify() {
        let escaped = escape("<b> see https://x.io/q");
        let out = linkify(&escaped);
        assert!(out.starts_with("&lt;b&gt; see "));
        assert!(out.contains("<a href=\"https://x.io/q\""));
        // exactly one anchor inserted
        assert_eq!(out.matches("<a href=").count(), 1);
    }
}
