//! sitemap2atom - Convert a sitemap.xml into an Atom feed and an enriched sitemap.

#![allow(dead_code)]

mod cli;
mod clock;
mod config;
mod enrich;
mod feed;
mod fetch;
mod generator;
mod logger;
mod output;
mod pipeline;
mod sitemap;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::Cli;
use clock::{Clock, FixedClock, SystemClock};
use config::Config;
use fetch::HttpFetcher;
use pipeline::Pipeline;
use utils::plural::plural_count;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = Config::load(&cli)?;
    if let Some(path) = &config.config_path {
        debug!("config"; "loaded {}", path.display());
    }

    let fetcher = HttpFetcher::new(&config.source)?;
    let clock: Box<dyn Clock> = match config.fixed_now() {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };

    let summary = Pipeline::new(&config, &fetcher, clock.as_ref()).run()?;

    if config.enrich.enable {
        log!(
            "done";
            "{} from {}, {} enriched",
            plural_count(summary.entries, "item"),
            plural_count(summary.urls, "url"),
            summary.enrich.enriched
        );
    } else {
        log!(
            "done";
            "{} from {}",
            plural_count(summary.entries, "item"),
            plural_count(summary.urls, "url")
        );
    }
    Ok(())
}
