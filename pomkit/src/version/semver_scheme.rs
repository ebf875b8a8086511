//! Cargo/npm style requirement matching backed by the `semver` crate.

use semver::{Version, VersionReq};

use super::VersionScheme;
use crate::error::{PomkitError, PomkitResult};

/// Matches strict semantic versions against comparator requirements such as
/// `>=1.0.0, <2.0.0` or `^1.4`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverScheme;

impl VersionScheme for SemverScheme {
    fn name(&self) -> &'static str {
        "semver"
    }

    fn matches(&self, version: &str, range: &str) -> PomkitResult<bool> {
        let req = VersionReq::parse(range.trim())
            .map_err(|e| PomkitError::malformed_version(range, e.to_string()))?;
        let version = Version::parse(version.trim())
            .map_err(|e| PomkitError::malformed_version(version, e.to_string()))?;
        Ok(req.matches(&version))
    }
}
