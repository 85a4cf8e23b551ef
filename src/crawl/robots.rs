// src/crawl/robots.rs
// =============================================================================
// robots.txt support: which pages are we not allowed to crawl?
//
// A robots.txt file is a list of groups. Each group starts with one or more
// "User-agent:" lines followed by rules:
//
//   User-agent: *
//   Disallow: /w/
//   Disallow: /wiki/Special:
//   Allow: /wiki/Special:Random
//
// The `robotxt` crate does the real matching: it picks the group for our
// user agent (falling back to "*"), applies the longest matching Allow or
// Disallow rule, and understands the `*` and `$` wildcards.
//
// We also keep the group's Disallow values in file order, but only so the
// `robots` subcommand can show them.
// =============================================================================

use super::fetch::PageFetcher;
use crate::error::{CrawlError, Result};
use robotxt::Robots;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub const ROBOTS_PATH: &str = "/robots.txt";

/// The agent name that every robots.txt group applies to
const ANY_AGENT: &str = "*";

/// Our own robots.txt agent name, the product token of our User-Agent header
pub const ROBOTS_AGENT: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Default)]
struct Group {
    agents: Vec<String>,
    disallowed: Vec<String>,
    has_rules: bool,
}

/// The robots.txt rules that apply to one user agent
#[derive(Clone, Default)]
pub struct RobotsRules {
    // None means "no robots.txt", which allows everything
    robots: Option<Arc<Robots>>,
    disallowed: Vec<String>,
}

impl RobotsRules {
    /// Rules that allow every path
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn parse(text: &str, user_agent: &str) -> Self {
        Self {
            robots: Some(Arc::new(Robots::from_bytes(text.as_bytes(), user_agent))),
            disallowed: parse_disallowed(text, user_agent),
        }
    }

    /// True if the in-site `path` may be crawled
    pub fn is_allowed(&self, path: &str) -> bool {
        match &self.robots {
            Some(robots) => robots.is_relative_allowed(path),
            None => true,
        }
    }

    /// The group's Disallow values, in file order, for display
    pub fn disallowed(&self) -> &[String] {
        &self.disallowed
    }
}

impl fmt::Debug for RobotsRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RobotsRules")
            .field("loaded", &self.robots.is_some())
            .field("disallowed", &self.disallowed)
            .finish()
    }
}

/// Downloads robots.txt and returns the rules for `user_agent`
///
/// A site without robots.txt (HTTP 404) allows everything.
pub async fn fetch_robots_rules<F: PageFetcher>(
    fetcher: &F,
    user_agent: &str,
) -> Result<RobotsRules> {
    let text = match fetcher.fetch(ROBOTS_PATH).await {
        Ok(text) => text,
        Err(CrawlError::HttpStatus { status: 404, .. }) => {
            info!("no robots.txt found, nothing is disallowed");
            return Ok(RobotsRules::allow_all());
        }
        Err(e) => return Err(e),
    };

    let rules = RobotsRules::parse(&text, user_agent);
    info!(
        disallow_rules = rules.disallowed().len(),
        user_agent, "loaded robots.txt rules"
    );
    Ok(rules)
}

/// The Disallow values of the group for `user_agent`, in file order
pub fn parse_disallowed(text: &str, user_agent: &str) -> Vec<String> {
    let groups = parse_groups(text);
    let agent = user_agent.trim().to_lowercase();

    // A group naming us wins over the catch-all group
    let named: Vec<&Group> = groups
        .iter()
        .filter(|g| agent != ANY_AGENT && g.agents.iter().any(|a| *a == agent))
        .collect();
    let selected = if named.is_empty() {
        groups
            .iter()
            .filter(|g| g.agents.iter().any(|a| a == ANY_AGENT))
            .collect()
    } else {
        named
    };

    let mut disallowed: Vec<String> = Vec::new();
    for group in selected {
        for path in &group.disallowed {
            if !disallowed.contains(path) {
                disallowed.push(path.clone());
            }
        }
    }

    debug!(?disallowed, "robots.txt disallowed prefixes");
    disallowed
}

fn parse_groups(text: &str) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut current: Option<Group> = None;

    for line in text.lines() {
        // Drop comments, then split "Field: value"
        let line = line.split('#').next().unwrap_or("").trim();
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim().to_lowercase();
        let value = value.trim();

        match field.as_str() {
            "user-agent" => {
                // An agent line after rules starts a new group
                if current.as_ref().is_some_and(|g| g.has_rules) {
                    groups.extend(current.take());
                }
                current
                    .get_or_insert_with(Group::default)
                    .agents
                    .push(value.to_lowercase());
            }
            "disallow" => {
                if let Some(group) = current.as_mut() {
                    group.has_rules = true;
                    // "Disallow:" with no value allows everything
                    if !value.is_empty() {
                        group.disallowed.push(value.to_string());
                    }
                }
            }
            _ => {
                if let Some(group) = current.as_mut() {
                    group.has_rules = true;
                }
            }
        }
    }

    groups.extend(current);
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawl::fetch::testing::MemoryFetcher;
    use crate::crawl::fetch::HttpFetcher;
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    const ROBOTS: &str = "\
# robots.txt for a wiki
User-agent: MJ12bot
Disallow: /

User-agent: *
Disallow: /w/
Disallow: /api/ # comment after a rule
Disallow:
Allow: /w/api.php?action=mobileview&
Disallow: /wiki/Special:

User-agent: *
Disallow: /w/
Disallow: /trap/
";

    #[test]
    fn test_wildcard_group() {
        let disallowed = parse_disallowed(ROBOTS, "*");
        assert_eq!(disallowed, vec!["/w/", "/api/", "/wiki/Special:", "/trap/"]);
    }

    #[test]
    fn test_named_group_wins() {
        assert_eq!(parse_disallowed(ROBOTS, "mj12bot"), vec!["/"]);
    }

    #[test]
    fn test_unknown_agent_falls_back_to_wildcard() {
        let disallowed = parse_disallowed(ROBOTS, "focus-crawler");
        assert_eq!(disallowed.first().map(String::as_str), Some("/w/"));
    }

    #[test]
    fn test_shared_group_for_several_agents() {
        let text = "User-agent: a\nUser-agent: b\nDisallow: /private/\n";
        assert_eq!(parse_disallowed(text, "b"), vec!["/private/"]);
    }

    #[test]
    fn test_rules_before_any_agent_are_ignored() {
        assert!(parse_disallowed("Disallow: /secret/\n", "*").is_empty());
    }

    #[test]
    fn test_allow_overrides_disallow() {
        let text = "User-agent: *\nDisallow: /wiki/\nAllow: /wiki/Neo\n";
        let rules = RobotsRules::parse(text, ROBOTS_AGENT);

        assert!(rules.is_allowed("/wiki/Neo"));
        assert!(!rules.is_allowed("/wiki/Oracle"));
    }

    #[test]
    fn test_wildcard_rules() {
        let text = "User-agent: *\nDisallow: /wiki/*_talk\nDisallow: /*.php$\n";
        let rules = RobotsRules::parse(text, ROBOTS_AGENT);

        assert!(!rules.is_allowed("/wiki/Some_talk"));
        assert!(rules.is_allowed("/wiki/Neo"));
        assert!(!rules.is_allowed("/w/index.php"));
        assert!(rules.is_allowed("/w/index.php5"));
    }

    #[test]
    fn test_group_for_our_agent_applies() {
        let text = "\
User-agent: *
Disallow: /wiki/Oracle

User-agent: focus-crawler
Disallow: /wiki/Neo
";
        let rules = RobotsRules::parse(text, ROBOTS_AGENT);

        assert!(!rules.is_allowed("/wiki/Neo"));
        assert!(rules.is_allowed("/wiki/Oracle"));
        assert_eq!(rules.disallowed(), ["/wiki/Neo"]);
    }

    #[test]
    fn test_allow_all_rules() {
        let rules = RobotsRules::allow_all();
        assert!(rules.is_allowed("/wiki/Anything"));
        assert!(rules.disallowed().is_empty());
    }

    #[tokio::test]
    async fn test_missing_robots_disallows_nothing() {
        let fetcher = MemoryFetcher::default();
        let rules = fetch_robots_rules(&fetcher, ROBOTS_AGENT).await.unwrap();

        assert!(rules.is_allowed("/wiki/Neo"));
        assert_eq!(fetcher.requests(), vec![ROBOTS_PATH]);
    }

    #[tokio::test]
    async fn test_fetch_robots_over_http() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string(ROBOTS))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(&mock_server.uri()).unwrap();
        let rules = fetch_robots_rules(&fetcher, ROBOTS_AGENT).await.unwrap();
        assert!(rules.disallowed().contains(&"/wiki/Special:".to_string()));
        assert!(!rules.is_allowed("/wiki/Special:Search"));
        assert!(rules.is_allowed("/wiki/Neo"));
    }

    #[tokio::test]
    async fn test_server_error_is_propagated() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/robots.txt"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let fetcher = HttpFetcher::new(&mock_server.uri()).unwrap();
        let err = fetch_robots_rules(&fetcher, ROBOTS_AGENT).await.unwrap_err();
        assert!(matches!(err, CrawlError::HttpStatus { status: 503, .. }));
    }
}
