// ABOUTME: Page title extraction with optional literal cleanup.

use crate::dom::Page;

/// Returns the text of the first `<title>` element, with every literal
/// occurrence of `strip` removed and surrounding whitespace trimmed. HTML
/// entities are already decoded by the parser. Returns an empty string when
/// the page has no title element; the caller decides whether that matters.
pub fn page_title(page: &Page, strip: Option<&str>) -> String {
    let Some(node) = page.select_known("title").into_iter().next() else {
        return String::new();
    };
    let mut title = node.plain_text();
    if let Some(strip) = strip {
        if !strip.is_empty() {
            title = title.replace(strip, "");
        }
    }
    title.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(html: &str) -> Page {
        Page::parse(html)
    }

    #[test]
    fn extracts_and_trims_the_title() {
        let page = page("<html><head><title>  My Site  </title></head><body></body></html>");
        assert_eq!(page_title(&page, None), "My Site");
    }

    #[test]
    fn entities_come_out_decoded() {
        let page = page("<html><head><title>Q &amp; A &#8212; Weekly</title></head></html>");
        assert_eq!(page_title(&page, None), "Q & A — Weekly");
    }

    #[test]
    fn strips_every_occurrence_of_the_cleanup_text() {
        let page = page("<html><head><title>Post | Blog | Blog</title></head></html>");
        let title = page_title(&page, Some(" | Blog"));
        assert_eq!(title, "Post");
        assert!(!title.contains(" | Blog"));
    }

    #[test]
    fn missing_title_yields_empty_string() {
        let page = page("<html><head></head><body><h1>Hi</h1></body></html>");
        assert_eq!(page_title(&page, None), "");
    }

    #[test]
    fn empty_cleanup_is_a_no_op() {
        let page = page("<html><head><title>Keep | Blog</title></head></html>");
        assert_eq!(page_title(&page, Some("")), "Keep | Blog");
    }
}
