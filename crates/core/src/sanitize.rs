// ABOUTME: Content sanitization: lazy-media conversion, absolute URL rewriting, cleanup removal.
// ABOUTME: All passes mutate a live tree and are idempotent for a fixed base and selector.

use url::Url;

use crate::dom::Page;
use crate::error::ExtractError;

/// Deferred-source attributes promoted to `src`, in priority order.
const LAZY_SRC_ATTRS: &[&str] = &[
    "data-src",
    "data-lazy-src",
    "data-original",
    "data-orig-src",
    "data-url",
];

/// Deferred srcset attributes promoted to `srcset`.
const LAZY_SRCSET_ATTRS: &[&str] = &["data-srcset", "data-lazy-srcset"];

/// Elements that carry media sources worth promoting.
const MEDIA_SELECTOR: &str = "img, iframe, video, audio, source";

/// Promotes deferred-loading media attributes to their standard equivalents
/// so the content renders without JavaScript. The deferred attribute is
/// dropped after promotion, which also makes the pass idempotent.
pub fn convert_lazy_media(page: &Page) {
    for node in page.select_known(MEDIA_SELECTOR) {
        // Every deferred attribute is dropped, but only the first non-empty
        // one (in priority order) wins the promotion.
        let mut promoted = false;
        for attr in LAZY_SRC_ATTRS {
            if let Some(value) = node.attribute(attr) {
                if !promoted && !value.is_empty() {
                    node.set_attribute("src", &value);
                    promoted = true;
                }
                node.remove_attribute(attr);
            }
        }
        let mut promoted = false;
        for attr in LAZY_SRCSET_ATTRS {
            if let Some(value) = node.attribute(attr) {
                if !promoted && !value.is_empty() {
                    node.set_attribute("srcset", &value);
                    promoted = true;
                }
                node.remove_attribute(attr);
            }
        }
    }
}

/// Rewrites every relative `href` and `src` attribute to an absolute URL
/// against `base`. Already-absolute URLs, empty values, and same-page
/// `#fragment` links are left untouched.
pub fn absolutize(page: &Page, base: &Url) {
    rewrite_attribute(page, "href", base);
    rewrite_attribute(page, "src", base);
}

fn rewrite_attribute(page: &Page, attr: &str, base: &Url) {
    let selector = format!("[{attr}]");
    for node in page.select_known(&selector) {
        let Some(value) = node.attribute(attr) else {
            continue;
        };
        if value.is_empty() || value.starts_with('#') {
            continue;
        }
        if let Some(resolved) = resolve_url(base, &value) {
            if resolved != value {
                node.set_attribute(attr, &resolved);
            }
        }
    }
}

/// Resolves `href` against `base`. Returns `None` when the value is neither a
/// valid absolute URL nor resolvable as a relative reference.
pub(crate) fn resolve_url(base: &Url, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.into()),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(href).ok().map(Into::into),
        Err(_) => None,
    }
}

/// Runs the full sanitization pass over an HTML fragment: lazy-media
/// conversion, absolute URL rewriting against `base`, and removal of every
/// subtree matching `cleanup`. Removal happens on the live tree, so a cleanup
/// selector matching both a parent and its child is safe.
pub fn sanitize_fragment(
    html: &str,
    base: &Url,
    cleanup: Option<&str>,
) -> Result<String, ExtractError> {
    let page = Page::from_fragment(html);
    convert_lazy_media(&page);
    absolutize(&page, base);
    if let Some(selector) = cleanup {
        if !selector.is_empty() {
            page.remove_all(selector)?;
        }
    }
    Ok(page.fragment_markup())
}
