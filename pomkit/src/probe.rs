//! File and directory existence checks with a dev-mode override.

use std::path::Path;

use tracing::debug;

use crate::config::PomkitConfig;

/// Stateless existence checks.
///
/// When dev-mode is enabled a failed check still reports `true`, so callers
/// do not hard-fail on build outputs that have not been produced yet. The
/// override only applies here; parsing and hashing are unaffected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe {
    dev_mode: bool,
}

impl PathProbe {
    /// Create a probe with an explicit dev-mode setting.
    pub fn new(dev_mode: bool) -> Self {
        Self { dev_mode }
    }

    /// Create a probe from configuration.
    pub fn from_config(config: &PomkitConfig) -> Self {
        Self::new(config.dev_mode)
    }

    /// Whether missing paths are reported as present.
    pub fn is_dev_mode(&self) -> bool {
        self.dev_mode
    }

    /// `true` if `path` is an existing regular file, or dev-mode is enabled.
    pub fn file_exists(&self, path: &Path) -> bool {
        if path.is_file() {
            return true;
        }
        self.override_missing(path, "file")
    }

    /// `true` if `path` is an existing directory, or dev-mode is enabled.
    pub fn directory_exists(&self, path: &Path) -> bool {
        if path.is_dir() {
            return true;
        }
        self.override_missing(path, "directory")
    }

    fn override_missing(&self, path: &Path, kind: &'static str) -> bool {
        if self.dev_mode {
            debug!(path = %path.display(), kind, "Dev-mode: treating missing path as present");
        }
        self.dev_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_existing_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("pom.xml");
        fs::write(&file, "<project/>").unwrap();

        let probe = PathProbe::new(false);
        assert!(probe.file_exists(&file));
        assert!(!probe.directory_exists(&file));
    }

    #[test]
    fn test_existing_directory() {
        let temp = TempDir::new().unwrap();

        let probe = PathProbe::new(false);
        assert!(probe.directory_exists(temp.path()));
        assert!(!probe.file_exists(temp.path()));
    }

    #[test]
    fn test_missing_paths_without_dev_mode() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("target");

        let probe = PathProbe::default();
        assert!(!probe.file_exists(&missing));
        assert!(!probe.directory_exists(&missing));
    }

    #[test]
    fn test_dev_mode_reports_missing_as_present() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("target").join("app.jar");

        let probe = PathProbe::new(true);
        assert!(probe.is_dev_mode());
        assert!(probe.file_exists(&missing));
        assert!(probe.directory_exists(&missing));
    }

    #[test]
    fn test_from_config() {
        let config = PomkitConfig::new().with_dev_mode(true);
        assert!(PathProbe::from_config(&config).is_dev_mode());
    }
}
