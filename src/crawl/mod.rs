// src/crawl/mod.rs
// =============================================================================
// This module handles the crawl itself.
//
// Features:
// - Relevance-first, level-by-level crawling from a seed page
// - A hard budget on how many pages get analyzed
// - Links robots.txt disallows are never crawled
// - Pages that fail to download are skipped (or abort the crawl, if asked)
//
// Submodules:
// - crawler: the traversal loop and per-page frontier building
// - fetch: the PageFetcher trait and its HTTP implementation
// - robots: robots.txt download and parsing
// =============================================================================

mod crawler;
mod fetch;
mod robots;

pub use crawler::{CrawlConfig, CrawlMode, CrawlReport, Crawler};
pub use fetch::{HttpFetcher, DEFAULT_BASE_URL};
pub use robots::{fetch_robots_rules, RobotsRules, ROBOTS_AGENT};
