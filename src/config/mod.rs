//! Configuration for a conversion run.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # [source], [feed], [sitemap], [enrich], [build]
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! └── mod.rs         # Config (this file)
//! ```
//!
//! Values come from three layers, later layers winning:
//!
//! 1. built-in defaults
//! 2. `sitemap2atom.toml` (optional)
//! 3. command-line arguments
//!
//! Relative paths from the config file resolve against the file's directory;
//! relative paths from the command line resolve against the working directory.

pub mod section;
pub mod types;

pub use section::{BuildConfig, EnrichConfig, FeedConfig, SitemapConfig, SourceConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{cli::Cli, log};
use anyhow::{Context, Result};
use atom_syndication::FixedDateTime;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the working directory when `-C` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "sitemap2atom.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitemap2atom.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Absolute path to the config file, if one was loaded (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative file paths resolve against (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub sitemap: SitemapConfig,

    #[serde(default)]
    pub enrich: EnrichConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Load configuration from CLI arguments.
    ///
    /// An explicit `-C` path must exist; the default file is optional.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let (config_path, explicit) = match &cli.config {
            Some(path) => (cwd.join(path), true),
            None => (cwd.join(DEFAULT_CONFIG_NAME), false),
        };

        let mut config = if config_path.is_file() {
            let mut config = Self::from_path(&config_path)?;
            config.root = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            config.config_path = Some(config_path);
            config
        } else if explicit {
            return Err(ConfigError::Io(
                config_path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            )
            .into());
        } else {
            Self {
                root: cwd.clone(),
                ..Self::default()
            }
        };

        config.finalize(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Resolve paths and apply command-line overrides.
    fn finalize(&mut self, cli: &Cli, cwd: &Path) {
        self.normalize_paths();
        self.apply_cli(cli, cwd);
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::from)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// The sitemap URL. Only call after validation.
    pub fn source_url(&self) -> &str {
        self.source.url.as_deref().unwrap_or_default()
    }

    /// Fixed clock value from `[build] now` / `--now`.
    pub fn fixed_now(&self) -> Option<FixedDateTime> {
        self.build.fixed_now()
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line arguments on top of the file configuration.
    fn apply_cli(&mut self, cli: &Cli, cwd: &Path) {
        if let Some(url) = &cli.url {
            self.source.url = Some(url.clone());
        }
        if let Some(output) = &cli.output {
            self.feed.path = cwd.join(output);
        }
        if let Some(sitemap_output) = &cli.sitemap_output {
            self.sitemap.path = cwd.join(sitemap_output);
        }
        if let Some(title) = &cli.title {
            self.feed.title = title.clone();
        }
        if let Some(now) = &cli.now {
            self.build.now = Some(now.clone());
        }
        if cli.max_entries.is_some() {
            self.source.max_entries = cli.max_entries;
        }

        Self::update_option(&mut self.source.timeout, cli.timeout.as_ref());
        Self::update_option(&mut self.enrich.enable, cli.enrich.as_ref());
        Self::update_option(&mut self.build.minify, cli.minify.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Resolve file-relative output paths against the root directory.
    fn normalize_paths(&mut self) {
        self.feed.path = self.root.join(&self.feed.path);
        self.sitemap.path = self.root.join(&self.sitemap.path);
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.source.validate(&mut diag);
        self.feed.validate(&mut diag);
        self.enrich.validate(&mut diag);
        self.build.validate(&mut diag);

        if self.feed.path == self.sitemap.path {
            diag.error_with_hint(
                FeedConfig::FIELDS.path,
                "feed and enriched sitemap would be written to the same file",
                "use --output or --sitemap-output to pick distinct paths",
            );
        }

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> Config {
    let (parsed, ignored) = Config::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

/// A validated config for `url` writing into `dir`, with a fixed clock.
#[cfg(test)]
pub fn test_config(url: &str, dir: &Path) -> Config {
    let mut config = Config {
        root: dir.to_path_buf(),
        ..Config::default()
    };
    config.source.url = Some(url.to_string());
    config.build.now = Some("2024-06-01T12:00:00Z".to_string());
    config.normalize_paths();
    config.validate().unwrap();
    config
}

// ============================================================================
// tests
// ============================================================================
