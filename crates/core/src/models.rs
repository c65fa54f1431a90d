// ABOUTME: Data model for extraction output: Entry and Feed.
// ABOUTME: Plain serializable structs; entries are immutable once appended.

use serde::Serialize;

/// One extracted feed item.
///
/// `content` is present when the matched index element carried summary markup,
/// or when the entry was expanded from its own page; it is `None` for plain
/// link-only matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub uri: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// The result of one extraction request: the index page URL, the page title
/// (after `title_cleanup`), and the surviving entries in output order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    pub uri: String,
    pub title: String,
    pub entries: Vec<Entry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_without_content_serializes_without_the_field() {
        let entry = Entry {
            uri: "https://example.com/a".into(),
            title: "A".into(),
            content: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("content").is_none());
        assert_eq!(value["uri"], "https://example.com/a");
    }

    #[test]
    fn feed_serializes_entries_in_order() {
        let feed = Feed {
            uri: "https://example.com/".into(),
            title: "Example".into(),
            entries: vec![
                Entry {
                    uri: "https://example.com/1".into(),
                    title: "One".into(),
                    content: None,
                },
                Entry {
                    uri: "https://example.com/2".into(),
                    title: "Two".into(),
                    content: Some("<p>hi</p>".into()),
                },
            ],
        };
        let value = serde_json::to_value(&feed).unwrap();
        assert_eq!(value["entries"][0]["title"], "One");
        assert_eq!(value["entries"][1]["content"], "<p>hi</p>");
    }
}
