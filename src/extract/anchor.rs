// src/extract/anchor.rs
// =============================================================================
// This module finds <a>...</a> tags in raw page text.
//
// Unlike a full DOM walk, we need to know WHERE in the text each anchor sits,
// because the relevance scorer looks at the words around it. So:
// - a regex finds each anchor and gives us its byte offsets
// - scraper parses just the opening tag to read its attributes
// - the regex capture group gives us the inner HTML
//
// Rust concepts:
// - Lifetimes: Anchor<'a> borrows from the page text instead of copying it
// - LazyLock: compile the regex once, on first use
// =============================================================================

use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

// Non-greedy, and (?s) lets `.` cross newlines so multi-line anchors match
static ANCHOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<a\s.*?>(.*?)</a>").expect("anchor pattern is a valid regex")
});

/// One <a>...</a> occurrence in a page
#[derive(Debug, Clone, PartialEq)]
pub struct Anchor<'a> {
    /// Byte offset of the `<` of the opening tag
    pub start: usize,
    /// Byte offset just past the closing `</a>`
    pub end: usize,
    /// The full matched text, tags included
    pub text: &'a str,
    /// Attributes of the opening tag, quotes stripped
    pub attributes: HashMap<String, String>,
    /// Everything between the opening and closing tag
    pub html: &'a str,
}

impl Anchor<'_> {
    /// Attribute value, or "" when the tag doesn't have it
    pub fn attr(&self, name: &str) -> &str {
        self.attributes.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn href(&self) -> Option<&str> {
        self.attributes.get("href").map(String::as_str)
    }
}

/// Skips the page header, starting at the first paragraph (`<p`)
///
/// Pages without a paragraph are analyzed whole.
pub fn page_body(text: &str) -> &str {
    match text.find("<p") {
        Some(index) => &text[index..],
        None => text,
    }
}

/// Finds every anchor in `text`, in document order
pub fn extract_anchors(text: &str) -> Vec<Anchor<'_>> {
    let mut anchors = Vec::new();

    for captures in ANCHOR_PATTERN.captures_iter(text) {
        // Group 0 always exists; group 1 always participates in a match
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        // The opening tag runs from the match start up to the inner content
        let opening_tag = &text[whole.start()..inner.start()];

        anchors.push(Anchor {
            start: whole.start(),
            end: whole.end(),
            text: whole.as_str(),
            attributes: parse_attributes(opening_tag),
            html: inner.as_str(),
        });
    }

    anchors
}

// Parses the attributes of an opening tag such as
// `<a href="/wiki/Neo" title='Neo' class=mw-redirect>`
//
// html5ever copes with quoted, unquoted and mixed quoting. Anything it can't
// make sense of just yields an empty map.
fn parse_attributes(opening_tag: &str) -> HashMap<String, String> {
    let mut attributes = HashMap::new();

    let fragment = Html::parse_fragment(opening_tag);
    let selector = match Selector::parse("a") {
        Ok(selector) => selector,
        Err(_) => return attributes,
    };

    if let Some(element) = fragment.select(&selector).next() {
        for (name, value) in element.value().attrs() {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    attributes
}
