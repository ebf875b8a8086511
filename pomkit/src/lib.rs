//! pomkit - Project descriptor coordinates and artifact integrity checks
//!
//! This library provides the parsing, hashing and comparison logic a build
//! plugin needs around Maven-style projects:
//!
//! - Read a project's coordinate (or its parent's) from `pom.xml`
//! - Verify a local file against a published MD5 checksum
//! - Replace a local file with remote content
//! - Check a version against an interval range such as `[1.0,2.0)`
//! - Check file and directory presence, with a dev-mode override
//!
//! # Dev-mode
//!
//! When the `APPSODY_DEV_MODE` environment variable is present, existence
//! checks report missing paths as present. The flag is read once by
//! [`PomkitConfig::from_env`] and passed explicitly to the components that
//! need it; nothing in the library reads the environment on its own.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pomkit::Toolkit;
//!
//! let toolkit = Toolkit::from_env()?;
//! let coordinate = toolkit.pom_coordinate(Path::new("pom.xml"))?;
//! let parent = toolkit.parent_pom_coordinate(Path::new("pom.xml"))?;
//!
//! if toolkit.verify_version(parent.version(), "[0.2,0.3)")? {
//!     println!("{} builds on a supported stack", coordinate);
//! }
//! # Ok::<(), pomkit::PomkitError>(())
//! ```

pub mod config;
pub mod coordinate;
pub mod descriptor;
pub mod error;
pub mod probe;
pub mod toolkit;
pub mod transfer;
pub mod version;

pub use config::PomkitConfig;
pub use coordinate::{ArtifactCoordinate, CoordinateResolver, DescriptorScope, POM_PACKAGING};
pub use descriptor::{DescriptorReader, ElementMap, ElementPath};
pub use error::{ErrorCategory, PomkitError, PomkitResult};
pub use probe::PathProbe;
pub use toolkit::Toolkit;
pub use transfer::{ContentSource, ContentTransfer, DigestAlgorithm, UrlSource};
pub use version::{matches as version_matches, VersionScheme};
