// src/extract/links.rs
// =============================================================================
// Decides which anchors are worth crawling.
//
// A link is a crawl candidate when:
// 1. it has an href
// 2. the href points at an in-site article (starts with e.g. "/wiki/")
// 3. the href has no ':' (special namespaces like File: or Talk:) and no '#'
//    (jumps within a page)
// 4. robots.txt doesn't disallow it
// =============================================================================

use super::anchor::Anchor;
use crate::crawl::RobotsRules;
use regex::Regex;
use std::sync::LazyLock;

/// Article links on the default site
pub const DEFAULT_LINK_PREFIX: &str = "/wiki/";

static BAD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[:#]+").expect("bad link pattern is a valid regex"));

/// Returns the anchor's href if the page it points to should be crawled
pub fn candidate_href<'b>(
    anchor: &'b Anchor<'_>,
    link_prefix: &str,
    robots: &RobotsRules,
) -> Option<&'b str> {
    anchor
        .href()
        .filter(|href| is_crawl_candidate(href, link_prefix, robots))
}

pub fn is_crawl_candidate(href: &str, link_prefix: &str, robots: &RobotsRules) -> bool {
    href.starts_with(link_prefix) && !BAD_LINK.is_match(href) && robots.is_allowed(href)
}
