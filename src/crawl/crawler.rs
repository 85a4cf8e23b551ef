// src/crawl/crawler.rs
// =============================================================================
// The crawl loop.
//
// How it works:
// 1. Analyze the seed page: fetch it, pull out its article links, score each
//    one against the keywords and put them in a WeightedQueue
// 2. The seed becomes the first "parent". Drain its queue best-first; every
//    page we take out is analyzed the same way (getting its own queue) and
//    lined up as a future parent
// 3. When a parent's queue is empty, move on to the next parent in line
// 4. Stop when the page budget is spent or we run out of parents
//
// So we go level by level (breadth-first) across parents, but inside each
// parent the most relevant links come first. In unweighted mode every link
// has the same weight and it's plain BFS.
//
// The seed itself is not counted against max_pages; the budget covers the
// pages taken out of frontier queues.
// =============================================================================

use super::fetch::PageFetcher;
use super::robots::RobotsRules;
use crate::error::{CrawlError, Result};
use crate::extract::{candidate_href, extract_anchors, page_body, DEFAULT_LINK_PREFIX};
use crate::frontier::WeightedQueue;
use crate::scoring::{score_anchor, Keywords};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info, warn};

/// Frontier of one page: link paths ordered by relevance
pub type PageFrontier = WeightedQueue<String, f64>;

/// How links are ordered within a page's frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlMode {
    /// Most relevant links first
    Weighted,
    /// Document order, every link with the neutral weight (plain BFS)
    Unweighted,
}

#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub keywords: Keywords,
    pub mode: CrawlMode,
    /// robots.txt rules; disallowed links never enter a frontier
    pub robots: RobotsRules,
    /// How many pages to take out of frontiers (the seed is extra)
    pub max_pages: usize,
    /// Only hrefs starting with this are followed
    pub link_prefix: String,
    /// Stop the whole crawl on the first failed page instead of skipping it
    pub abort_on_fetch_error: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            keywords: Keywords::default(),
            mode: CrawlMode::Weighted,
            robots: RobotsRules::allow_all(),
            max_pages: 100,
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            abort_on_fetch_error: false,
        }
    }
}

impl CrawlConfig {
    pub fn with_keywords(mut self, keywords: Keywords) -> Self {
        self.keywords = keywords;
        self
    }

    pub fn with_mode(mut self, mode: CrawlMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_robots(mut self, robots: RobotsRules) -> Self {
        self.robots = robots;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_link_prefix(mut self, link_prefix: impl Into<String>) -> Self {
        self.link_prefix = link_prefix.into();
        self
    }

    pub fn with_abort_on_fetch_error(mut self, abort: bool) -> Self {
        self.abort_on_fetch_error = abort;
        self
    }
}

/// A page taken out of its parent's frontier and analyzed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Visit {
    pub parent: String,
    pub page: String,
    /// Weight the page had in the parent's frontier
    pub weight: f64,
    /// Seed is level 0, its links level 1, ...
    pub level: usize,
}

/// A page we tried to visit but couldn't fetch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedPage {
    pub parent: String,
    pub page: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: String,
    pub mode: CrawlMode,
    /// Visited pages, in visiting order
    pub visits: Vec<Visit>,
    pub skipped: Vec<SkippedPage>,
    /// Pages counted against max_pages (visited + skipped)
    pub pages_analyzed: usize,
    /// Links still queued in the last parent's frontier when the budget ran
    /// out, best first
    pub unvisited: Vec<String>,
}

// Pages analyzed but whose frontier hasn't been drained yet, plus the budget
// counter. Lives for exactly one crawl() call.
#[derive(Debug, Default)]
struct CrawlState {
    frontiers: HashMap<String, PageFrontier>,
    pages_analyzed: usize,
}

pub struct Crawler<F> {
    fetcher: F,
    config: CrawlConfig,
}

impl<F: PageFetcher> Crawler<F> {
    pub fn new(fetcher: F, config: CrawlConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Crawls from `seed` until the page budget is spent or no links remain
    pub async fn crawl(&self, seed: &str) -> Result<CrawlReport> {
        if seed.trim().is_empty() {
            return Err(CrawlError::InvalidInput("empty seed path".to_string()));
        }

        info!(
            seed,
            mode = ?self.config.mode,
            max_pages = self.config.max_pages,
            "starting crawl"
        );

        let mut state = CrawlState::default();
        let mut report = CrawlReport {
            seed: seed.to_string(),
            mode: self.config.mode,
            visits: Vec::new(),
            skipped: Vec::new(),
            pages_analyzed: 0,
            unvisited: Vec::new(),
        };

        // A seed we can't fetch leaves nothing to crawl
        let seed_frontier = self.analyze(seed).await?;
        state.frontiers.insert(seed.to_string(), seed_frontier);

        let mut parents: VecDeque<(String, usize)> = VecDeque::new();
        parents.push_back((seed.to_string(), 0));

        while let Some((parent, level)) = parents.pop_front() {
            if state.frontiers.is_empty() {
                break;
            }

            // The same page can be lined up twice if two parents link to it;
            // its frontier is gone after the first drain
            let Some(mut frontier) = state.frontiers.remove(&parent) else {
                debug!(parent = %parent, "frontier already drained");
                continue;
            };

            while state.pages_analyzed < self.config.max_pages && !frontier.is_empty() {
                let Some(entry) = frontier.extract_entry() else {
                    break;
                };
                state.pages_analyzed += 1;

                match self.analyze(&entry.item).await {
                    Ok(child_frontier) => {
                        debug!(parent = %parent, page = %entry.item, weight = entry.weight, "visited");
                        state.frontiers.insert(entry.item.clone(), child_frontier);
                        parents.push_back((entry.item.clone(), level + 1));
                        report.visits.push(Visit {
                            parent: parent.clone(),
                            page: entry.item,
                            weight: entry.weight,
                            level: level + 1,
                        });
                    }
                    Err(e) if e.is_fetch_failure() && !self.config.abort_on_fetch_error => {
                        warn!(page = %entry.item, error = %e, "skipping page");
                        report.skipped.push(SkippedPage {
                            parent: parent.clone(),
                            page: entry.item,
                            error: e.to_string(),
                        });
                    }
                    Err(e) => return Err(e),
                }
            }

            // A page linking to itself re-registers a fresh frontier under the
            // parent's key; the parent is done either way
            state.frontiers.remove(&parent);

            if state.pages_analyzed >= self.config.max_pages {
                report.unvisited = std::iter::from_fn(|| frontier.extract()).collect();
                break;
            }
        }

        report.pages_analyzed = state.pages_analyzed;
        info!(
            visited = report.visits.len(),
            skipped = report.skipped.len(),
            "crawl finished"
        );
        Ok(report)
    }

    async fn analyze(&self, page: &str) -> Result<PageFrontier> {
        let text = self.fetcher.fetch(page).await?;
        Ok(build_frontier(&text, &self.config))
    }
}

/// Builds the frontier of one page from its text
pub fn build_frontier(page_text: &str, config: &CrawlConfig) -> PageFrontier {
    let body = page_body(page_text);
    let mut frontier = PageFrontier::new();

    for anchor in extract_anchors(body) {
        let Some(href) = candidate_href(&anchor, &config.link_prefix, &config.robots) else {
            continue;
        };

        match config.mode {
            CrawlMode::Weighted => {
                let weight = score_anchor(body, &anchor, &config.keywords);
                frontier.add_weighted(href.to_string(), weight);
            }
            CrawlMode::Unweighted => {
                frontier.add(href.to_string());
            }
        }
    }

    debug!(links = frontier.len(), "built frontier");
    frontier
}
