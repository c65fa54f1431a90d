// ABOUTME: Candidate entry extraction from the index page via the url selector.
// ABOUTME: Builds a URL-keyed, insertion-ordered map; later duplicates overwrite in place.

use indexmap::IndexMap;
use url::Url;

use crate::dom::{normalize_whitespace, Page, PageNode};
use crate::error::ExtractError;
use crate::models::Entry;
use crate::sanitize;

/// Applies `url_selector` to the index page and builds one candidate entry
/// per matched element, deduplicated by resolved URL.
///
/// A matched element is either the entry link itself, or a wrapper around it:
///
/// - when the element carries child markup (its inner markup differs from its
///   plain text), that inner markup becomes the entry's summary content;
/// - when the element is not an anchor, the first `<a>` descendant supplies
///   the entry URL and title. A match with no anchor inside means the
///   selector does not fit the page, which fails the same way as a selector
///   matching nothing at all.
///
/// Summary content is sanitized immediately, with the entry's own URL as the
/// base for link resolution. Entries land in an insertion-ordered map keyed
/// by URL: inserting an existing key replaces the value but keeps the key's
/// original position, so the last-seen element wins while output order stays
/// the order of first occurrence.
pub fn find_entries(
    page: &Page,
    base: &Url,
    url_selector: &str,
    content_cleanup: Option<&str>,
) -> Result<IndexMap<String, Entry>, ExtractError> {
    let matches = page.find(url_selector)?;
    if matches.is_empty() {
        return Err(ExtractError::NoMatch("url_selector"));
    }

    let mut entries: IndexMap<String, Entry> = IndexMap::new();
    for node in &matches {
        let summary = summary_markup(node);

        let anchor = if node.tag().as_deref() == Some("a") {
            *node
        } else {
            node.find("a")
                .into_iter()
                .next()
                .ok_or(ExtractError::NoMatch("url_selector"))?
        };
        let href = anchor
            .attribute("href")
            .filter(|href| !href.is_empty())
            .ok_or(ExtractError::NoMatch("url_selector"))?;

        // Hrefs that resolve neither absolutely nor against the page base are
        // kept verbatim rather than dropped.
        let uri = sanitize::resolve_url(base, &href).unwrap_or(href);
        let title = normalize_whitespace(&anchor.plain_text());

        let content = match summary {
            Some(markup) => {
                let entry_base = Url::parse(&uri).ok();
                let content_base = entry_base.as_ref().unwrap_or(base);
                Some(sanitize::sanitize_fragment(
                    &markup,
                    content_base,
                    content_cleanup,
                )?)
            }
            None => None,
        };

        entries.insert(uri.clone(), Entry { uri, title, content });
    }

    Ok(entries)
}

/// Returns the node's inner markup when it wraps more than bare link text.
fn summary_markup(node: &PageNode<'_>) -> Option<String> {
    let inner = node.inner_markup();
    if inner.contains('<') && inner != node.plain_text() {
        Some(inner)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("https://example.com/blog/").unwrap()
    }

    #[test]
    fn plain_anchor_matches_produce_link_only_entries() {
        let page = Page::parse(
            r#"<body>
                <a class="article" href="/blog/one">First post</a>
                <a class="article" href="/blog/two">Second post</a>
            </body>"#,
        );
        let entries = find_entries(&page, &base(), "a.article", None).unwrap();
        assert_eq!(entries.len(), 2);
        let first = &entries["https://example.com/blog/one"];
        assert_eq!(first.title, "First post");
        assert_eq!(first.content, None);
    }

    #[test]
    fn wrapper_matches_carry_sanitized_summary_content() {
        let page = Page::parse(
            r#"<body><div class="teaser">
                <a href="/blog/one">First post</a>
                <img data-src="/img/one.jpg">
                <p>Short summary</p>
            </div></body>"#,
        );
        let entries = find_entries(&page, &base(), "div.teaser", None).unwrap();
        let entry = &entries["https://example.com/blog/one"];
        assert_eq!(entry.title, "First post");
        let content = entry.content.as_deref().unwrap();
        assert!(content.contains(r#"src="https://example.com/img/one.jpg""#));
        assert!(!content.contains("data-src"));
        assert!(content.contains("Short summary"));
    }

    #[test]
    fn content_cleanup_applies_to_summaries() {
        let page = Page::parse(
            r#"<body><div class="teaser">
                <a href="/blog/one">First post</a>
                <div class="ads">buy things</div>
            </div></body>"#,
        );
        let entries = find_entries(&page, &base(), "div.teaser", Some("div.ads")).unwrap();
        let content = entries["https://example.com/blog/one"]
            .content
            .as_deref()
            .unwrap();
        assert!(!content.contains("buy things"));
    }

    #[test]
    fn zero_matches_fail_with_no_match() {
        let page = Page::parse("<body><p>nothing here</p></body>");
        let err = find_entries(&page, &base(), "a.article", None).unwrap_err();
        assert!(matches!(err, ExtractError::NoMatch("url_selector")));
    }

    #[test]
    fn wrapper_without_anchor_fails_with_no_match() {
        let page = Page::parse(r#"<body><div class="teaser"><p>no link</p></div></body>"#);
        let err = find_entries(&page, &base(), "div.teaser", None).unwrap_err();
        assert!(matches!(err, ExtractError::NoMatch("url_selector")));
    }

    #[test]
    fn duplicate_urls_keep_first_position_and_last_content() {
        let page = Page::parse(
            r#"<body>
                <div class="teaser"><a href="/blog/one">First post</a><p>old summary</p></div>
                <a class="other" href="/blog/two">Second post</a>
                <div class="teaser"><a href="/blog/one">First post</a><p>new summary</p></div>
            </body>"#,
        );
        let entries = find_entries(&page, &base(), "div.teaser, a.other", None).unwrap();
        assert_eq!(entries.len(), 2);

        let keys: Vec<&String> = entries.keys().collect();
        assert_eq!(keys[0], "https://example.com/blog/one");
        assert_eq!(keys[1], "https://example.com/blog/two");

        let content = entries["https://example.com/blog/one"]
            .content
            .as_deref()
            .unwrap();
        assert!(content.contains("new summary"));
        assert!(!content.contains("old summary"));
    }

    #[test]
    fn already_absolute_hrefs_pass_through() {
        let page = Page::parse(
            r#"<body><a class="article" href="https://other.net/post">Elsewhere</a></body>"#,
        );
        let entries = find_entries(&page, &base(), "a.article", None).unwrap();
        assert!(entries.contains_key("https://other.net/post"));
    }

    #[test]
    fn anchor_with_entities_only_is_not_summary_content() {
        let page = Page::parse(r#"<body><a class="article" href="/one">Q &amp; A</a></body>"#);
        let entries = find_entries(&page, &base(), "a.article", None).unwrap();
        let entry = &entries["https://example.com/one"];
        assert_eq!(entry.content, None);
        assert_eq!(entry.title, "Q & A");
    }

    #[test]
    fn anchor_wrapping_markup_is_its_own_summary() {
        let page = Page::parse(
            r#"<body><a class="card" href="/one"><b>Bold</b> teaser</a></body>"#,
        );
        let entries = find_entries(&page, &base(), "a.card", None).unwrap();
        let content = entries["https://example.com/one"].content.as_deref().unwrap();
        assert!(content.contains("<b>Bold</b>"));
    }
}
