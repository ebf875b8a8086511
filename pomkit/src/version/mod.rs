//! Version range matching.
//!
//! The [`VersionScheme`] trait decouples the range dialect from its callers.
//! Two schemes are provided:
//!
//! - [`OsgiScheme`] (default): interval notation such as `[1.0,2.0)`, with
//!   `major.minor.micro.qualifier` versions. This is the dialect used by
//!   plugin and module version declarations.
//! - [`SemverScheme`]: comparator requirements such as `>=1.0.0, <2.0.0`,
//!   backed by the `semver` crate.
//!
//! # Example
//!
//! ```
//! use pomkit::version::matches;
//!
//! assert!(matches("1.5.0", "[1.0,2.0)").unwrap());
//! assert!(!matches("2.0.0", "[1.0,2.0)").unwrap());
//! assert!(matches("1.0.0", "[1.0,2.0)").unwrap());
//! ```

mod osgi;
mod semver_scheme;

pub use osgi::{OsgiScheme, Version, VersionRange};
pub use semver_scheme::SemverScheme;

use crate::error::PomkitResult;

/// A version comparison dialect.
pub trait VersionScheme: Send + Sync {
    /// Short name of the dialect, used in diagnostics.
    fn name(&self) -> &'static str;

    /// Whether `version` satisfies `range`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedVersionExpression` if either string cannot be parsed.
    /// A malformed expression is never reported as a non-match.
    fn matches(&self, version: &str, range: &str) -> PomkitResult<bool>;
}

/// Check `version` against `range` using the default interval dialect.
pub fn matches(version: &str, range: &str) -> PomkitResult<bool> {
    OsgiScheme.matches(version, range)
}
