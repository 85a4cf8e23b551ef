// src/extract/mod.rs
// =============================================================================
// This module turns page text into crawlable links.
//
// Submodules:
// - anchor: finds <a> tags with their offsets, attributes and inner HTML
// - links: filters anchors down to in-site article links
// =============================================================================

mod anchor;
mod links;

pub use anchor::{extract_anchors, page_body, Anchor};
pub use links::{candidate_href, DEFAULT_LINK_PREFIX};
