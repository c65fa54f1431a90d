// ABOUTME: Document/Node abstraction over the HTML parser.
// ABOUTME: Every pipeline component talks to Page/PageNode, never to dom_query directly.

//! Parsed-page abstraction.
//!
//! The pipeline never touches the underlying parser types; it works through
//! [`Page`] and [`PageNode`], which expose exactly the capability set the
//! extraction stages need: selector lookup, tag/text/markup access, attribute
//! read/write, and in-place subtree removal. Mutations operate on the live
//! tree, so removing a node implicitly removes its descendants and later
//! selector matches observe earlier removals.

mod compiled;

use dom_query::{Document, NodeRef, Selection};

use crate::error::ExtractError;

/// A parsed HTML page (or fragment wrapped into one).
pub struct Page {
    doc: Document,
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page").finish_non_exhaustive()
    }
}

impl Page {
    /// Parses a full HTML document.
    pub fn parse(html: &str) -> Page {
        Page {
            doc: Document::from(html),
        }
    }

    /// Parses an HTML fragment by wrapping it into a document body.
    ///
    /// Use [`Page::fragment_markup`] to serialize the fragment back out.
    pub fn from_fragment(html: &str) -> Page {
        Page {
            doc: Document::from(format!("<html><body>{html}</body></html>")),
        }
    }

    /// Applies a caller-supplied CSS selector, returning matches in document
    /// order. An unparseable selector is a configuration error.
    pub fn find(&self, css: &str) -> Result<Vec<PageNode<'_>>, ExtractError> {
        let matcher = compiled::get_or_compile(css)
            .ok_or_else(|| ExtractError::config(format!("invalid selector {css:?}")))?;
        Ok(self
            .doc
            .select_matcher(&matcher)
            .nodes()
            .iter()
            .map(|node| PageNode { node: *node })
            .collect())
    }

    /// Applies a selector that is known-valid at compile time (internal fixed
    /// strings). Invalid input yields no matches instead of an error.
    pub(crate) fn select_known(&self, css: &str) -> Vec<PageNode<'_>> {
        match compiled::get_or_compile(css) {
            Some(matcher) => self
                .doc
                .select_matcher(&matcher)
                .nodes()
                .iter()
                .map(|node| PageNode { node: *node })
                .collect(),
            None => Vec::new(),
        }
    }

    /// Removes every subtree matching a caller-supplied selector from the
    /// live tree. Nested matches are safe: removing a parent detaches its
    /// descendants with it.
    pub fn remove_all(&self, css: &str) -> Result<(), ExtractError> {
        let matcher = compiled::get_or_compile(css)
            .ok_or_else(|| ExtractError::config(format!("invalid selector {css:?}")))?;
        self.doc.select_matcher(&matcher).remove();
        Ok(())
    }

    /// Serializes the body contents. For pages built with
    /// [`Page::from_fragment`] this is the (possibly mutated) fragment.
    pub fn fragment_markup(&self) -> String {
        self.doc.select("body").inner_html().to_string()
    }
}

/// One element of a [`Page`]. Copyable handle borrowing the page's tree.
#[derive(Clone, Copy, Debug)]
pub struct PageNode<'a> {
    node: NodeRef<'a>,
}

impl<'a> PageNode<'a> {
    fn selection(&self) -> Selection<'a> {
        Selection::from(self.node)
    }

    /// Lowercase element name, `None` for non-element nodes.
    pub fn tag(&self) -> Option<String> {
        self.node.node_name().map(|name| name.to_lowercase())
    }

    /// Concatenated text content with entities decoded by the parser.
    pub fn plain_text(&self) -> String {
        self.selection().text().to_string()
    }

    /// Serialized contents of the element, excluding the element itself.
    pub fn inner_markup(&self) -> String {
        self.selection().inner_html().to_string()
    }

    /// Serialized element including its own tag.
    pub fn outer_markup(&self) -> String {
        self.selection().html().to_string()
    }

    /// Attribute value, if present.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.selection().attr(name).map(|value| value.to_string())
    }

    /// Sets (or replaces) an attribute on the live tree.
    pub fn set_attribute(&self, name: &str, value: &str) {
        self.selection().set_attr(name, value);
    }

    /// Drops an attribute from the live tree.
    pub fn remove_attribute(&self, name: &str) {
        self.selection().remove_attr(name);
    }

    /// Descendant lookup with a fixed, known-valid selector.
    pub fn find(&self, css: &str) -> Vec<PageNode<'a>> {
        let selection = self.selection();
        let found = selection.select(css);
        found
            .nodes()
            .iter()
            .map(|node| PageNode { node: *node })
            .collect()
    }

    /// Detaches this node (and its subtree) from the tree.
    pub fn remove(&self) {
        self.selection().remove();
    }
}

/// Collapses runs of whitespace into single spaces.
pub(crate) fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
        <html><head><title>Sample</title></head><body>
            <div class="teaser">
                <a href="/posts/1">First  post</a>
                <p>Summary text</p>
            </div>
            <a class="bare" href="/posts/2">Second</a>
        </body></html>
    "#;

    #[test]
    fn find_returns_matches_in_document_order() {
        let page = Page::parse(SAMPLE);
        let anchors = page.find("a").unwrap();
        assert_eq!(anchors.len(), 2);
        assert_eq!(anchors[0].attribute("href").unwrap(), "/posts/1");
        assert_eq!(anchors[1].attribute("href").unwrap(), "/posts/2");
    }

    #[test]
    fn find_rejects_invalid_selectors() {
        let page = Page::parse(SAMPLE);
        let err = page.find("[[[nope").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn node_exposes_tag_text_and_markup() {
        let page = Page::parse(SAMPLE);
        let teaser = page.find("div.teaser").unwrap().remove(0);
        assert_eq!(teaser.tag().as_deref(), Some("div"));
        assert!(teaser.plain_text().contains("Summary text"));
        assert!(teaser.inner_markup().contains("<p>Summary text</p>"));
        assert!(teaser.outer_markup().starts_with("<div"));
    }

    #[test]
    fn descendant_find_scopes_to_the_node() {
        let page = Page::parse(SAMPLE);
        let teaser = page.find("div.teaser").unwrap().remove(0);
        let anchors = teaser.find("a");
        assert_eq!(anchors.len(), 1);
        assert_eq!(anchors[0].plain_text(), "First  post");
    }

    #[test]
    fn remove_all_deletes_subtrees_from_the_live_tree() {
        let page = Page::from_fragment("<div><p class=\"ads\">buy</p><p>keep</p></div>");
        page.remove_all("p.ads").unwrap();
        let markup = page.fragment_markup();
        assert!(!markup.contains("buy"));
        assert!(markup.contains("keep"));
    }

    #[test]
    fn set_attribute_mutates_serialized_output() {
        let page = Page::from_fragment("<img data-src=\"/a.jpg\">");
        let img = page.find("img").unwrap().remove(0);
        img.set_attribute("src", "/a.jpg");
        img.remove_attribute("data-src");
        let markup = page.fragment_markup();
        assert!(markup.contains("src=\"/a.jpg\""));
        assert!(!markup.contains("data-src"));
    }

    #[test]
    fn normalize_whitespace_collapses_runs() {
        assert_eq!(normalize_whitespace("  a \n\t b  "), "a b");
        assert_eq!(normalize_whitespace(""), "");
    }
}
