pub mod classify;
pub mod cli;
pub mod description;
pub mod error;
pub mod ics;
pub mod models;
pub mod render;
pub mod schedule;

use reqwest::{Client, Url};
use std::env;
use std::io::{self, IsTerminal};
use tracing::debug;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::models::DateKey;
use crate::render::{render_card, render_json, Report, Theme};

pub const DEFAULT_FEED_URL: &str = "https://example.com/events.ics";
pub const DEFAULT_TITLE: &str = "Upcoming events";

pub const FEED_URL_ENV: &str = "EVENTCARD_FEED_URL";
pub const TITLE_ENV: &str = "EVENTCARD_TITLE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub feed_url: String,
    pub title: String,
    pub json: bool,
    pub include_historical: bool,
}

impl Config {
    pub fn build(cli: &Cli) -> Result<Config> {
        Config::from_lookup(cli, |key| env::var(key).ok())
    }

    /// Like [`Config::build`], reading overrides through `lookup` instead of
    /// the process environment.
    pub fn from_lookup(cli: &Cli, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
        let feed_url = lookup(FEED_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

        Url::parse(&feed_url)
            .map_err(|e| Error::Config(format!("invalid feed URL {feed_url:?}: {e}")))?;

        let title = lookup(TITLE_ENV)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());

        Ok(Config {
            feed_url,
            title,
            json: cli.json,
            include_historical: cli.historical,
        })
    }
}

/// Fetches the feed and runs it through decoding, classification and the
/// date filter. `today` is the reference date for dropping past events.
pub async fn load_report(config: &Config, client: &Client, today: &DateKey) -> Result<Report> {
    let raw_events = ics::fetch_and_parse_ics(client, &config.feed_url).await?;
    debug!(events = raw_events.len(), "Parsed calendar feed");

    let buckets = classify::build_buckets(&raw_events)?;
    let events = schedule::sort_and_filter(buckets, config.include_historical, today);
    debug!(events = events.len(), today = %today, "Filtered events");

    Ok(Report {
        title: config.title.clone(),
        source: config.feed_url.clone(),
        events,
    })
}

pub async fn run(config: Config) -> Result<()> {
    let client = Client::new();
    let report = load_report(&config, &client, &DateKey::today()).await?;

    let output = if config.json {
        render_json(&report)?
    } else if io::stdout().is_terminal() {
        render_card(&report, &Theme::default())?
    } else {
        render_card(&report, &Theme::plain())?
    };

    println!("{output}");

    Ok(())
}
