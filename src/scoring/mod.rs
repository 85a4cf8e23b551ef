// src/scoring/mod.rs
// =============================================================================
// Link relevance scoring.
//
// Submodules:
// - relevance: keyword set and the distance-decay word walk
// =============================================================================

mod relevance;

pub use relevance::{score_anchor, Keywords};
