//! One conversion run: fetch → parse → map → enrich → render → write.
//!
//! Every step before the final commit works in memory, so any error leaves
//! previously written outputs as they were.

use crate::{
    clock::{Clock, FixedClock},
    config::Config,
    debug,
    enrich::{EnrichStats, enrich_entries},
    feed::{MappingError, map_records},
    fetch::{Fetch, FetchError},
    generator::{
        atom::{FeedMeta, render_atom},
        sitemap::render_sitemap,
    },
    log,
    output::{OutputFile, WriteError, commit},
    sitemap::{ParseError, parse_sitemap},
    utils::plural::plural_count,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("invalid sitemap at `{url}`")]
    Parse {
        url: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("failed to render Atom feed")]
    Render(#[from] atom_syndication::Error),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// What a successful run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// URLs listed by the sitemap, before `max_entries`.
    pub urls: usize,
    /// Entries written to the feed.
    pub entries: usize,
    pub enrich: EnrichStats,
}

pub struct Pipeline<'a> {
    config: &'a Config,
    fetcher: &'a dyn Fetch,
    clock: &'a dyn Clock,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config, fetcher: &'a dyn Fetch, clock: &'a dyn Clock) -> Self {
        Self {
            config,
            fetcher,
            clock,
        }
    }

    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let config = self.config;
        let url = config.source_url();

        log!("fetch"; "{}", url);
        let xml = self.fetcher.fetch(url)?;

        let mut records = parse_sitemap(&xml).map_err(|source| PipelineError::Parse {
            url: url.to_string(),
            source,
        })?;
        let urls = records.len();
        if let Some(max) = config.source.max_entries
            && urls > max
        {
            debug!("sitemap"; "keeping the first {} of {}", max, plural_count(urls, "url"));
            records.truncate(max);
        }

        // One instant for the whole run.
        let clock = FixedClock(self.clock.now());
        let mut entries = map_records(&records, &clock)?;
        let enrich = enrich_entries(&mut entries, self.fetcher, &config.enrich);

        let minify = config.build.minify;
        let meta = FeedMeta::resolve(config, &entries, clock.now());
        let feed = render_atom(&meta, &entries, minify)?;
        let sitemap = render_sitemap(&records, &entries, minify);

        commit(&[
            OutputFile {
                path: &config.feed.path,
                content: &feed,
            },
            OutputFile {
                path: &config.sitemap.path,
                content: &sitemap,
            },
        ])?;

        log!("atom"; "{} ({})", config.feed.path.display(), plural_count(entries.len(), "item"));
        log!("sitemap"; "{}", config.sitemap.path.display());

        Ok(RunSummary {
            urls,
            entries: entries.len(),
            enrich,
        })
    }
}
