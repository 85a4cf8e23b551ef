// src/frontier/mod.rs
// =============================================================================
// The crawl frontier: one weighted queue per visited page, holding the links
// we found on it and haven't visited yet.
//
// Submodules:
// - queue: the sorted, duplicate-free WeightedQueue
// - weight: the traits that say how weights are compared
// =============================================================================

mod queue;
mod weight;

pub use queue::WeightedQueue;
