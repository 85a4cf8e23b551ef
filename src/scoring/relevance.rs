// src/scoring/relevance.rs
// =============================================================================
// Scores a link by how close it sits to one of our keywords.
//
// The score is a number in [0, 1]:
// - 1.0 if the keyword is in the link itself (its text or its href)
// - 1 / (d + 2) if the keyword is the d-th word to the left or right of it
// - 0.0 if no keyword shows up within MAX_WALK_STEPS words on either side
//
// Words are whatever sits between single spaces, tags and all. That's crude,
// but it's cheap and good enough to tell a relevant paragraph from a footer.
//
// All offsets are byte offsets. We only ever cut the text at a space or at
// its ends, which are always valid UTF-8 boundaries, so walking through
// multi-byte text can't panic.
// =============================================================================

use crate::extract::Anchor;

/// How many words to look at on each side of a link
pub const MAX_WALK_STEPS: usize = 20;

/// Score of a link that mentions a keyword itself
pub const DIRECT_MATCH: f64 = 1.0;

/// Score of a link with no keyword anywhere near it
pub const NO_MATCH: f64 = 0.0;

/// A case-insensitive keyword set
#[derive(Debug, Clone, Default)]
pub struct Keywords {
    lowered: Vec<String>,
}

impl Keywords {
    /// Builds the set, dropping blank keywords (they would match everything)
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lowered = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();
        Self { lowered }
    }

    /// True if any keyword is a substring of `text`, ignoring case
    pub fn matches(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let text = text.to_lowercase();
        self.lowered.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.lowered.is_empty()
    }
}

/// Relevance of `anchor`, which was found in `page`, to `keywords`
pub fn score_anchor(page: &str, anchor: &Anchor<'_>, keywords: &Keywords) -> f64 {
    if keywords.matches(anchor.html) || keywords.matches(anchor.attr("href")) {
        return DIRECT_MATCH;
    }

    let mut left = anchor.start;
    let mut right = anchor.end;

    for distance in 1..=MAX_WALK_STEPS {
        let left_word = word_left_of(page, left);
        let right_word = word_right_of(page, right);

        if keywords.matches(left_word) || keywords.matches(right_word) {
            return 1.0 / (distance as f64 + 2.0);
        }

        // Step past the word we just read plus its separator
        left = left.saturating_sub(left_word.len() + 1);
        right = (right + right_word.len() + 1).min(page.len());
    }

    NO_MATCH
}

// The word ending at the nearest space before `pos`:
// "alpha beta |" -> "beta". Empty once we run out of spaces.
fn word_left_of(text: &str, pos: usize) -> &str {
    let bytes = text.as_bytes();
    let pos = pos.min(bytes.len());

    let Some(end) = bytes[..pos].iter().rposition(|&b| b == b' ') else {
        return "";
    };
    let start = bytes[..end]
        .iter()
        .rposition(|&b| b == b' ')
        .map_or(0, |space| space + 1);

    &text[start..end]
}

// The word starting after the nearest space at or after `pos`:
// "| alpha beta" -> "alpha". A word running up to the end of the text counts.
fn word_right_of(text: &str, pos: usize) -> &str {
    let bytes = text.as_bytes();
    let pos = pos.min(bytes.len());

    let Some(start) = bytes[pos..].iter().position(|&b| b == b' ').map(|i| pos + i) else {
        return "";
    };
    let end = bytes[start + 1..]
        .iter()
        .position(|&b| b == b' ')
        .map_or(bytes.len(), |i| start + 1 + i);

    &text[start + 1..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_anchors;

    fn matrix() -> Keywords {
        Keywords::new(["Matrix"])
    }

    fn score_first(page: &str, keywords: &Keywords) -> f64 {
        let anchors = extract_anchors(page);
        score_anchor(page, &anchors[0], keywords)
    }

    fn filler(words: usize) -> String {
        vec!["word"; words].join(" ")
    }

    #[test]
    fn test_keyword_in_anchor_text() {
        let page = r#"<p>far away <a href="/wiki/Film">The MATRIX</a> text</p>"#;
        assert_eq!(score_first(page, &matrix()), 1.0);
    }

    #[test]
    fn test_keyword_in_href() {
        let page = r#"<p>x <a href="/wiki/The_Matrix">the film</a> y</p>"#;
        assert_eq!(score_first(page, &matrix()), 1.0);
    }

    #[test]
    fn test_adjacent_left_word() {
        let page = r#"<p>in the matrix <a href="/wiki/Neo">Neo</a> is</p>"#;
        assert_eq!(score_first(page, &matrix()), 1.0 / 3.0);
    }

    #[test]
    fn test_second_word_to_the_right() {
        let page = r#"<p><a href="/wiki/Neo">Neo</a> escapes matrix</p>"#;
        // Right words: "escapes", then "matrix</p>"
        assert_eq!(score_first(page, &matrix()), 1.0 / 4.0);
    }

    #[test]
    fn test_keyword_at_last_step() {
        // 19 filler words between keyword and link: keyword is word 20
        let page = format!(r#"matrix {} <a href="/wiki/Neo">Neo</a>"#, filler(19));
        assert_eq!(score_first(&page, &matrix()), 1.0 / 22.0);
    }

    #[test]
    fn test_keyword_beyond_walk_limit() {
        let page = format!(r#"matrix {} <a href="/wiki/Neo">Neo</a>"#, filler(20));
        assert_eq!(score_first(&page, &matrix()), 0.0);
    }

    #[test]
    fn test_no_keyword_anywhere() {
        let page = r#"<p>nothing to see <a href="/wiki/Neo">Neo</a> here</p>"#;
        assert_eq!(score_first(page, &matrix()), 0.0);
    }

    #[test]
    fn test_anchor_spanning_whole_text() {
        let page = r#"<a href="/wiki/Neo">Neo</a>"#;
        assert_eq!(score_first(page, &matrix()), 0.0);
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let page = r#"<p>naïve café (<a href="/wiki/Neo">Neo</a>) über Matrix</p>"#;
        // Right words: "über", then "Matrix</p>"
        assert_eq!(score_first(page, &matrix()), 1.0 / 4.0);
    }

    #[test]
    fn test_word_walk_at_boundaries() {
        assert_eq!(word_left_of("alpha beta", 0), "");
        assert_eq!(word_left_of("alpha beta", 100), "alpha");
        assert_eq!(word_right_of("alpha beta", 10), "");
        assert_eq!(word_right_of("alpha beta", 3), "beta");
        assert_eq!(word_right_of("", 0), "");
    }

    #[test]
    fn test_blank_keywords_are_dropped() {
        let keywords = Keywords::new(["", "  "]);
        assert!(keywords.is_empty());
        assert!(!keywords.matches("anything"));
    }
}
