// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging (to stderr, so JSON on stdout stays clean)
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Print the results and exit with a proper code (0 = success, 2 = error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;       // src/cli.rs - command-line parsing
mod crawl;     // src/crawl/ - traversal, fetching, robots.txt
mod error;     // src/error.rs - crawl error type
mod extract;   // src/extract/ - anchors and link filtering
mod frontier;  // src/frontier/ - the weighted queue
mod scoring;   // src/scoring/ - link relevance

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, CrawlArgs};
use crawl::{CrawlConfig, CrawlMode, CrawlReport, Crawler, HttpFetcher, RobotsRules};
use scoring::Keywords;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the default of info-level logs from this crate only
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("focus_crawler=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Crawl(args) => handle_crawl(args).await,
        Commands::Robots {
            base_url,
            user_agent,
            json,
        } => handle_robots(&base_url, &user_agent, json).await,
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(args: CrawlArgs) -> Result<i32> {
    let fetcher = HttpFetcher::new(&args.base_url)?;

    let robots = if args.ignore_robots {
        RobotsRules::allow_all()
    } else {
        crawl::fetch_robots_rules(&fetcher, &args.user_agent)
            .await
            .context("could not load robots.txt (use --ignore-robots to skip it)")?
    };

    let mode = if args.unweighted {
        CrawlMode::Unweighted
    } else {
        CrawlMode::Weighted
    };

    let config = CrawlConfig::default()
        .with_keywords(Keywords::new(&args.keywords))
        .with_mode(mode)
        .with_robots(robots)
        .with_max_pages(args.max_pages)
        .with_link_prefix(args.link_prefix)
        .with_abort_on_fetch_error(args.fail_fast);

    if config.keywords.is_empty() {
        anyhow::bail!("at least one non-blank keyword is required");
    }

    let crawler = Crawler::new(fetcher, config);
    let report = crawler
        .crawl(&args.seed)
        .await
        .with_context(|| format!("crawl from {} failed", args.seed))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, crawler.config().max_pages);
    }

    Ok(0)
}

// Handles the 'robots' subcommand
async fn handle_robots(base_url: &str, user_agent: &str, json: bool) -> Result<i32> {
    let fetcher = HttpFetcher::new(base_url)?;
    let rules = crawl::fetch_robots_rules(&fetcher, user_agent)
        .await
        .context("could not load robots.txt")?;
    let disallowed = rules.disallowed();

    if json {
        println!("{}", serde_json::to_string_pretty(disallowed)?);
    } else if disallowed.is_empty() {
        println!("Nothing is disallowed for user agent '{}'", user_agent);
    } else {
        for path in disallowed {
            println!("{}", path);
        }
    }

    Ok(0)
}

// Prints the visits as a human-readable table in the terminal
fn print_report(report: &CrawlReport, max_pages: usize) {
    println!("{:<45} {:<45} {:>8} {:>6}", "PARENT", "PAGE", "WEIGHT", "LEVEL");
    println!("{}", "=".repeat(107));

    for visit in &report.visits {
        println!(
            "{:<45} {:<45} {:>8.4} {:>6}",
            truncate(&visit.parent, 45),
            truncate(&visit.page, 45),
            visit.weight,
            visit.level
        );
    }

    if !report.skipped.is_empty() {
        println!();
        println!("Skipped pages:");
        for skipped in &report.skipped {
            println!("   {} ({})", skipped.page, skipped.error);
        }
    }

    println!();
    println!("Summary:");
    println!("   Seed: {}", report.seed);
    println!("   Visited: {}", report.visits.len());
    println!("   Skipped: {}", report.skipped.len());
    println!("   Budget used: {}/{}", report.pages_analyzed, max_pages);
    if !report.unvisited.is_empty() {
        println!("   Left in queue: {}", report.unvisited.len());
    }
}

// Shortens long paths so the table columns stay aligned
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        text.to_string()
    }
}
