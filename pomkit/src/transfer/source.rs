//! Byte sources for remote content.

use std::fs::File;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::Url;
use tracing::debug;

use crate::config::PomkitConfig;
use crate::error::{PomkitError, PomkitResult};

/// A readable stream opened from a URL.
pub type ContentStream<'a> = Box<dyn Read + Send + 'a>;

/// Opens remote resources for reading.
///
/// This is the only place where bytes cross the network boundary, so tests
/// can substitute an in-memory implementation.
pub trait ContentSource: Send + Sync {
    /// Open `url` for reading.
    ///
    /// # Errors
    ///
    /// Returns `NetworkFailure` (or `Timeout`) if the resource cannot be opened.
    fn open(&self, url: &Url) -> PomkitResult<ContentStream<'_>>;
}

/// Resolves `http`, `https` and `file` URLs.
#[derive(Debug, Clone)]
pub struct UrlSource {
    client: Client,
    timeout: Duration,
}

impl UrlSource {
    /// Create a source using the timeout and user agent from `config`.
    ///
    /// # Errors
    ///
    /// Returns `ClientInit` if the HTTP client cannot be built (for example
    /// when no TLS backend is available).
    pub fn new(config: &PomkitConfig) -> PomkitResult<Self> {
        let client = Client::builder()
            .timeout(config.http_timeout)
            .connect_timeout(config.http_timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| PomkitError::ClientInit {
                reason: e.to_string(),
            })?;

        Ok(Self {
            client,
            timeout: config.http_timeout,
        })
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn open_http(&self, url: &Url) -> PomkitResult<ContentStream<'_>> {
        let response = self.client.get(url.clone()).send().map_err(|e| {
            if e.is_timeout() {
                PomkitError::Timeout {
                    url: url.to_string(),
                    timeout_secs: self.timeout.as_secs(),
                }
            } else {
                PomkitError::network(url.as_str(), e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PomkitError::network(
                url.as_str(),
                format!("GET request failed with status {}", status),
            ));
        }

        debug!(url = %url, status = %status, "Opened remote resource");
        Ok(Box::new(response))
    }

    fn open_file(&self, url: &Url) -> PomkitResult<ContentStream<'_>> {
        let path = url.to_file_path().map_err(|_| PomkitError::InvalidUrl {
            url: url.to_string(),
            reason: "not a local file path".to_string(),
        })?;
        let file = File::open(&path).map_err(|e| PomkitError::network(url.as_str(), e))?;
        Ok(Box::new(file))
    }
}

impl ContentSource for UrlSource {
    fn open(&self, url: &Url) -> PomkitResult<ContentStream<'_>> {
        match url.scheme() {
            "http" | "https" => self.open_http(url),
            "file" => self.open_file(url),
            other => Err(PomkitError::network(
                url.as_str(),
                format!("unsupported URL scheme '{}'", other),
            )),
        }
    }
}
