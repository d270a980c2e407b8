//! HTTP fetching for the sitemap document and, when enriching, its pages.
//!
//! One GET per URL, no retry. A failed request or a non-2xx status is a
//! `FetchError`; the caller decides whether that aborts the run.

use crate::{config::SourceConfig, debug};
use reqwest::{StatusCode, blocking::Client};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("failed to fetch `{url}`")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} from `{url}`")]
    Status { url: String, status: StatusCode },

    #[error("failed to read response body from `{url}`")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Anything that can turn a URL into a document body.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Blocking reqwest client with the configured timeout and user agent.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        if let Some(content_type) = response.headers().get(reqwest::header::CONTENT_TYPE) {
            debug!("fetch"; "{} ({})", url, content_type.to_str().unwrap_or("?"));
        }

        response.text().map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }
}

/// In-memory fetcher for tests. Unknown URLs answer 404.
#[cfg(test)]
#[derive(Default)]
pub struct StubFetcher {
    bodies: std::collections::HashMap<String, String>,
    calls: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl StubFetcher {
    pub fn with(mut self, url: &str, body: impl Into<String>) -> Self {
        self.bodies.insert(url.to_string(), body.into());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[cfg(test)]
impl Fetch for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.borrow_mut().push(url.to_string());
        self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: StatusCode::NOT_FOUND,
        })
    }
}
