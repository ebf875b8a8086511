//! Artifact coordinates resolved from project descriptors.
//!
//! # Overview
//!
//! A coordinate identifies a build artifact by group, artifact, version and
//! packaging. [`CoordinateResolver`] reads the first three from a `pom.xml`,
//! either from the project itself or from its `<parent>` declaration, and
//! always uses [`POM_PACKAGING`] for the packaging.
//!
//! ```text
//! <project>                       DescriptorScope::Primary
//!   <groupId>…</groupId>          /project/groupId
//!   <artifactId>…</artifactId>    /project/artifactId
//!   <version>…</version>          /project/version
//!   <parent>                      DescriptorScope::Parent
//!     <groupId>…</groupId>        /project/parent/groupId
//!     <artifactId>…</artifactId>  /project/parent/artifactId
//!     <version>…</version>        /project/parent/version
//!   </parent>
//! </project>
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use pomkit::{CoordinateResolver, DescriptorScope, PathProbe};
//!
//! let resolver = CoordinateResolver::new(PathProbe::new(false));
//! let coordinate = resolver.resolve(Path::new("pom.xml"), DescriptorScope::Primary)?;
//! println!("{}", coordinate);
//! # Ok::<(), pomkit::PomkitError>(())
//! ```

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::descriptor::{DescriptorReader, ElementMap};
use crate::error::{PomkitError, PomkitResult};
use crate::probe::PathProbe;

/// Packaging type of coordinates resolved from a descriptor.
pub const POM_PACKAGING: &str = "pom";

/// Group, artifact, version and packaging of a build artifact.
///
/// Immutable once built; fields are exposed through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    group_id: String,
    artifact_id: String,
    version: String,
    packaging: String,
}

impl ArtifactCoordinate {
    /// Create a coordinate.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        packaging: impl Into<String>,
    ) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            packaging: packaging.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn packaging(&self) -> &str {
        &self.packaging
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.packaging, self.version
        )
    }
}

/// Which declaration in the descriptor to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorScope {
    /// The project's own coordinate.
    Primary,
    /// The coordinate declared in `<parent>`.
    Parent,
}

impl DescriptorScope {
    /// Group, artifact and version paths, in that order.
    pub fn element_paths(&self) -> [&'static str; 3] {
        match self {
            Self::Primary => [
                "/project/groupId",
                "/project/artifactId",
                "/project/version",
            ],
            Self::Parent => [
                "/project/parent/groupId",
                "/project/parent/artifactId",
                "/project/parent/version",
            ],
        }
    }
}

impl fmt::Display for DescriptorScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Parent => write!(f, "parent"),
        }
    }
}

/// Builds [`ArtifactCoordinate`]s from descriptor files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateResolver {
    reader: DescriptorReader,
}

impl CoordinateResolver {
    pub fn new(probe: PathProbe) -> Self {
        Self {
            reader: DescriptorReader::new(probe),
        }
    }

    /// Resolve the coordinate for `scope` from the descriptor at `path`.
    ///
    /// Values are trimmed; an element whose text is empty after trimming is
    /// treated as missing, so a returned coordinate never has an empty field.
    ///
    /// # Errors
    ///
    /// Errors from [`DescriptorReader::read_elements`] are returned
    /// unchanged, including `MissingDescriptor` from its existence gate.
    pub fn resolve(&self, path: &Path, scope: DescriptorScope) -> PomkitResult<ArtifactCoordinate> {
        let [g_path, a_path, v_path] = scope.element_paths();
        let mut map = self.reader.read_elements(path, &[g_path, a_path, v_path])?;

        let coordinate = ArtifactCoordinate::new(
            required(&mut map, g_path, path)?,
            required(&mut map, a_path, path)?,
            required(&mut map, v_path, path)?,
            POM_PACKAGING,
        );

        debug!(path = %path.display(), scope = %scope, coordinate = %coordinate, "Resolved coordinate");
        Ok(coordinate)
    }

    /// Resolve the project's own coordinate.
    pub fn resolve_primary(&self, path: &Path) -> PomkitResult<ArtifactCoordinate> {
        self.resolve(path, DescriptorScope::Primary)
    }

    /// Resolve the coordinate of the declared parent.
    pub fn resolve_parent(&self, path: &Path) -> PomkitResult<ArtifactCoordinate> {
        self.resolve(path, DescriptorScope::Parent)
    }
}

fn required(map: &mut ElementMap, element: &str, descriptor: &Path) -> PomkitResult<String> {
    map.take(element)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| PomkitError::MissingDescriptorElement {
            element: element.to_string(),
            descriptor: descriptor.to_path_buf(),
        })
}
