//! Error types for pomkit operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for pomkit operations.
pub type PomkitResult<T> = Result<T, PomkitError>;

/// Coarse classification of a [`PomkitError`].
///
/// Several variants can share a category (a timeout is still a network
/// failure), so callers that only care about the kind of failure can branch
/// on this instead of on individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    MissingDescriptor,
    MissingDescriptorElement,
    DescriptorParse,
    MalformedVersionExpression,
    Io,
    Network,
    DigestUnavailable,
}

/// Errors that can occur while resolving coordinates or transferring content.
#[derive(Debug, Error)]
pub enum PomkitError {
    /// The descriptor file does not exist and dev-mode did not override the check.
    #[error("project descriptor not found: {}", path.display())]
    MissingDescriptor { path: PathBuf },

    /// An element path matched no node in the descriptor.
    #[error("element {element} not found in project descriptor {}", descriptor.display())]
    MissingDescriptorElement { element: String, descriptor: PathBuf },

    /// The descriptor is not a well-formed document.
    #[error("failed to parse project descriptor {}: {reason}", path.display())]
    DescriptorParse { path: PathBuf, reason: String },

    /// An element path expression could not be parsed.
    #[error("invalid element path '{expression}': {reason}")]
    InvalidElementPath { expression: String, reason: String },

    /// A version or version range could not be parsed.
    #[error("malformed version expression '{expression}': {reason}")]
    MalformedVersionExpression { expression: String, reason: String },

    /// Failed to read a local file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed { path: PathBuf, source: io::Error },

    /// Failed to write a local file.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },

    /// A remote resource could not be fetched.
    #[error("failed to fetch {url}: {reason}")]
    NetworkFailure { url: String, reason: String },

    /// A remote fetch did not complete in time.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// The HTTP client could not be constructed.
    #[error("failed to initialize HTTP client: {reason}")]
    ClientInit { reason: String },

    /// The URL string could not be parsed.
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The requested digest algorithm is not available.
    #[error("digest algorithm not available: {algorithm}")]
    DigestUnavailable { algorithm: String },
}

impl PomkitError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingDescriptor { .. } => ErrorCategory::MissingDescriptor,
            Self::MissingDescriptorElement { .. } => ErrorCategory::MissingDescriptorElement,
            Self::DescriptorParse { .. } | Self::InvalidElementPath { .. } => {
                ErrorCategory::DescriptorParse
            }
            Self::MalformedVersionExpression { .. } => ErrorCategory::MalformedVersionExpression,
            Self::ReadFailed { .. } | Self::WriteFailed { .. } => ErrorCategory::Io,
            Self::NetworkFailure { .. }
            | Self::Timeout { .. }
            | Self::InvalidUrl { .. }
            | Self::ClientInit { .. } => ErrorCategory::Network,
            Self::DigestUnavailable { .. } => ErrorCategory::DigestUnavailable,
        }
    }

    pub(crate) fn malformed_version(expression: &str, reason: impl Into<String>) -> Self {
        Self::MalformedVersionExpression {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn network(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::NetworkFailure {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}
