//! Single entry point wiring every component from one configuration.

use std::path::Path;

use crate::config::PomkitConfig;
use crate::coordinate::{ArtifactCoordinate, CoordinateResolver, DescriptorScope};
use crate::error::PomkitResult;
use crate::probe::PathProbe;
use crate::transfer::{ContentSource, ContentTransfer, UrlSource};
use crate::version::{OsgiScheme, VersionScheme};

/// Facade over the probe, resolver, content transfer and version scheme.
///
/// Build one at process start from [`PomkitConfig::from_env`] and share it;
/// it holds no mutable state.
#[derive(Debug, Clone)]
pub struct Toolkit<S = UrlSource> {
    config: PomkitConfig,
    probe: PathProbe,
    resolver: CoordinateResolver,
    transfer: ContentTransfer<S>,
    versions: OsgiScheme,
}

impl Toolkit<UrlSource> {
    /// Create a toolkit that fetches over `http`, `https` and `file` URLs.
    pub fn new(config: PomkitConfig) -> PomkitResult<Self> {
        let transfer = ContentTransfer::new(&config)?;
        Ok(Self::with_transfer(config, transfer))
    }

    /// Create a toolkit from the process environment.
    pub fn from_env() -> PomkitResult<Self> {
        Self::new(PomkitConfig::from_env())
    }
}

impl<S: ContentSource> Toolkit<S> {
    /// Create a toolkit around an existing content transfer.
    pub fn with_transfer(config: PomkitConfig, transfer: ContentTransfer<S>) -> Self {
        let probe = PathProbe::from_config(&config);
        Self {
            config,
            probe,
            resolver: CoordinateResolver::new(probe),
            transfer,
            versions: OsgiScheme,
        }
    }

    pub fn config(&self) -> &PomkitConfig {
        &self.config
    }

    pub fn file_exists(&self, path: &Path) -> bool {
        self.probe.file_exists(path)
    }

    pub fn directory_exists(&self, path: &Path) -> bool {
        self.probe.directory_exists(path)
    }

    /// Coordinate of the project described by `pom`.
    pub fn pom_coordinate(&self, pom: &Path) -> PomkitResult<ArtifactCoordinate> {
        self.resolver.resolve(pom, DescriptorScope::Primary)
    }

    /// Coordinate of the parent declared by `pom`.
    pub fn parent_pom_coordinate(&self, pom: &Path) -> PomkitResult<ArtifactCoordinate> {
        self.resolver.resolve(pom, DescriptorScope::Parent)
    }

    /// Whether `version` lies in the interval `range`, e.g. `[1.0,2.0)`.
    pub fn verify_version(&self, version: &str, range: &str) -> PomkitResult<bool> {
        self.versions.matches(version, range)
    }

    /// Uppercase hex digest of `file`.
    pub fn digest(&self, file: &Path) -> PomkitResult<String> {
        self.transfer.digest(file)
    }

    /// Text content of `url`.
    pub fn fetch_text(&self, url: &str) -> PomkitResult<String> {
        self.transfer.fetch_text(url)
    }

    /// Whether `file` matches the checksum published at `checksum_url`.
    pub fn verify_file_integrity(&self, file: &Path, checksum_url: &str) -> PomkitResult<bool> {
        self.transfer.verify_integrity(file, checksum_url)
    }

    /// Overwrite `file` with the content at `source_url`.
    pub fn replace_file(&self, source_url: &str, file: &Path) -> PomkitResult<()> {
        self.transfer.replace(source_url, file)
    }
}
