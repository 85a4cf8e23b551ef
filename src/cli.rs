// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Enums: Types that can be one of several variants
// - Derive macros: Automatically generate code for our types
// =============================================================================

use crate::crawl::{DEFAULT_BASE_URL, ROBOTS_AGENT};
use crate::extract::DEFAULT_LINK_PREFIX;
use clap::{Args, Parser, Subcommand};

// This struct represents our entire CLI application
#[derive(Parser, Debug)]
#[command(
    name = "focus-crawler",
    version,
    about = "A focused crawler that visits the links closest to your keywords first",
    long_about = "focus-crawler starts at a seed page, scores every article link by how close it \
                  sits to your keywords and visits the best links first, level by level, until \
                  its page budget runs out."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl from a seed page, most relevant links first
    ///
    /// Example: focus-crawler crawl "/wiki/Morpheus_(The_Matrix)" -k matrix
    Crawl(CrawlArgs),

    /// Show the paths robots.txt disallows for a user agent
    ///
    /// Example: focus-crawler robots --user-agent "*"
    Robots {
        /// Site whose robots.txt to read
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// robots.txt user agent whose rules apply (falls back to "*")
        #[arg(long, default_value = ROBOTS_AGENT)]
        user_agent: String,

        /// Output the list as JSON
        #[arg(long)]
        json: bool,
    },
}

// Arguments of the 'crawl' subcommand
//
// #[derive(Args)] lets a whole struct act as one subcommand's arguments,
// which keeps the Commands enum readable
#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// In-site path of the seed page (e.g., /wiki/Morpheus_(The_Matrix))
    pub seed: String,

    /// Keyword to look for; repeat for several (-k matrix -k neo)
    #[arg(short, long = "keyword", required = true)]
    pub keywords: Vec<String>,

    /// How many pages to visit after the seed
    #[arg(long, default_value_t = 100)]
    pub max_pages: usize,

    /// Ignore relevance and crawl plain breadth-first
    #[arg(long)]
    pub unweighted: bool,

    /// Site to crawl
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Only links starting with this path are followed
    #[arg(long, default_value = DEFAULT_LINK_PREFIX)]
    pub link_prefix: String,

    /// robots.txt user agent whose rules apply (falls back to "*")
    #[arg(long, default_value = ROBOTS_AGENT)]
    pub user_agent: String,

    /// Don't download or apply robots.txt
    #[arg(long)]
    pub ignore_robots: bool,

    /// Stop on the first page that fails to download instead of skipping it
    #[arg(long)]
    pub fail_fast: bool,

    /// Output the crawl report as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
