//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Convert a sitemap.xml into an Atom feed and an enriched sitemap
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Sitemap URL to convert (overrides `[source] url`)
    #[arg(value_hint = clap::ValueHint::Url)]
    pub url: Option<String>,

    /// Config file path (default: sitemap2atom.toml, optional)
    #[arg(short = 'C', long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Atom feed output path
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Enriched sitemap output path
    #[arg(short = 's', long = "sitemap-output", value_hint = clap::ValueHint::FilePath)]
    pub sitemap_output: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Keep only the first N URLs of the sitemap
    #[arg(short = 'n', long)]
    pub max_entries: Option<usize>,

    /// Feed title
    #[arg(long)]
    pub title: Option<String>,

    /// Use a fixed RFC 3339 timestamp instead of the current time
    #[arg(long, value_name = "RFC3339")]
    pub now: Option<String>,

    /// Fetch each page and add its OpenGraph/Twitter metadata to the feed
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub enrich: Option<bool>,

    /// Minify the XML output
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = true)]
    pub minify: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
