//! Configuration for pomkit operations.

use std::time::Duration;

use tracing::warn;

use crate::transfer::DigestAlgorithm;

/// Environment variable that enables dev-mode when present (any value).
pub const DEV_MODE_ENV: &str = "APPSODY_DEV_MODE";

/// Environment variable overriding the HTTP timeout, in whole seconds.
pub const HTTP_TIMEOUT_ENV: &str = "POMKIT_HTTP_TIMEOUT_SECS";

/// Default timeout for remote fetches in seconds.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

const MIN_HTTP_TIMEOUT_SECS: u64 = 1;
const MAX_HTTP_TIMEOUT_SECS: u64 = 300;

/// Configuration shared by the probe, the resolver and the content transfer.
#[derive(Debug, Clone)]
pub struct PomkitConfig {
    /// Treat missing files and directories as present.
    ///
    /// Intended for local development loops where expected build outputs
    /// have not been produced yet. Only affects existence checks.
    pub dev_mode: bool,

    /// Connect and read timeout for remote fetches.
    pub http_timeout: Duration,

    /// User-Agent header sent with HTTP requests.
    pub user_agent: String,

    /// Digest used for integrity checks.
    pub digest: DigestAlgorithm,
}

impl Default for PomkitConfig {
    fn default() -> Self {
        Self {
            dev_mode: false,
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            user_agent: format!("pomkit/{}", env!("CARGO_PKG_VERSION")),
            digest: DigestAlgorithm::default(),
        }
    }
}

impl PomkitConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the process environment.
    ///
    /// Call this once at process start and pass the result down; library
    /// code never consults the environment on its own.
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Load configuration using `lookup` to resolve environment variables.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.dev_mode = lookup(DEV_MODE_ENV).is_some();

        if let Some(raw) = lookup(HTTP_TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => {
                    config.http_timeout = Duration::from_secs(
                        secs.clamp(MIN_HTTP_TIMEOUT_SECS, MAX_HTTP_TIMEOUT_SECS),
                    );
                }
                Err(e) => {
                    warn!(
                        variable = HTTP_TIMEOUT_ENV,
                        value = %raw,
                        error = %e,
                        "Ignoring invalid HTTP timeout, using default"
                    );
                }
            }
        }

        config
    }

    /// Enable or disable dev-mode.
    pub fn with_dev_mode(mut self, enabled: bool) -> Self {
        self.dev_mode = enabled;
        self
    }

    /// Set the HTTP timeout.
    pub fn with_http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the digest algorithm.
    pub fn with_digest(mut self, digest: DigestAlgorithm) -> Self {
        self.digest = digest;
        self
    }
}
