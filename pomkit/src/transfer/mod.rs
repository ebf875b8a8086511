//! Remote content transfer and local integrity checks.
//!
//! This module provides:
//! - Streaming file digests (`checksum`)
//! - URL-based byte sources (`source`)
//! - [`ContentTransfer`], which combines the two to fetch remote text, verify
//!   a local file against a published checksum, and replace a local file with
//!   remote content
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use pomkit::{ContentTransfer, PomkitConfig};
//!
//! let transfer = ContentTransfer::new(&PomkitConfig::from_env())?;
//! let ok = transfer.verify_integrity(
//!     Path::new("target/app.jar"),
//!     "https://repo.example.com/app/1.0/app-1.0.jar.md5",
//! )?;
//! ```

mod checksum;
mod source;

pub use checksum::{calculate_file_digest, DigestAlgorithm};
pub use source::{ContentSource, ContentStream, UrlSource};

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use reqwest::Url;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::PomkitConfig;
use crate::error::{PomkitError, PomkitResult};

/// Chunk size for reading remote content (4KB).
const FETCH_CHUNK_SIZE: usize = 4 * 1024;

/// Fetches remote text and compares or installs it locally.
#[derive(Debug, Clone)]
pub struct ContentTransfer<S = UrlSource> {
    source: S,
    digest: DigestAlgorithm,
}

impl ContentTransfer<UrlSource> {
    /// Create a transfer backed by [`UrlSource`].
    pub fn new(config: &PomkitConfig) -> PomkitResult<Self> {
        Ok(Self::with_source(UrlSource::new(config)?, config.digest))
    }
}

impl<S: ContentSource> ContentTransfer<S> {
    /// Create a transfer over a custom byte source.
    pub fn with_source(source: S, digest: DigestAlgorithm) -> Self {
        Self { source, digest }
    }

    /// Digest algorithm in use.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.digest
    }

    /// Digest of a local file, as uppercase hex.
    pub fn digest(&self, file: &Path) -> PomkitResult<String> {
        calculate_file_digest(file, self.digest)
    }

    /// Fetch a remote resource as text.
    ///
    /// The body is read in fixed-size chunks and decoded as UTF-8 once it is
    /// complete, so multi-byte characters that straddle a chunk boundary are
    /// preserved. Invalid sequences are replaced with U+FFFD.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `url` does not parse, and `NetworkFailure` or
    /// `Timeout` if the resource cannot be read.
    pub fn fetch_text(&self, url: &str) -> PomkitResult<String> {
        let parsed = Url::parse(url).map_err(|e| PomkitError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut stream = self.source.open(&parsed)?;
        let bytes = read_chunked(&mut stream).map_err(|e| PomkitError::network(url, e))?;

        debug!(url = %url, bytes = bytes.len(), "Fetched remote content");

        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Whether the local file's digest equals the text at `checksum_url`.
    ///
    /// The comparison is exact: no whitespace is trimmed and case is
    /// significant. A checksum resource with a trailing newline therefore
    /// never matches. A mismatch is reported as `Ok(false)`; only failures to
    /// hash or fetch are errors.
    pub fn verify_integrity(&self, file: &Path, checksum_url: &str) -> PomkitResult<bool> {
        let local = self.digest(file)?;
        let published = self.fetch_text(checksum_url)?;

        if local == published {
            debug!(path = %file.display(), url = %checksum_url, "Integrity verified");
            Ok(true)
        } else {
            warn!(
                path = %file.display(),
                url = %checksum_url,
                expected = %published.escape_debug(),
                actual = %local,
                "Integrity check failed"
            );
            Ok(false)
        }
    }

    /// Replace the content of `file` with the text at `source_url`.
    ///
    /// The text is written to a temporary file next to `file` and renamed
    /// over it, so `file` holds either its old content or the complete new
    /// content. If the fetch fails the file is not touched.
    ///
    /// # Errors
    ///
    /// Returns the fetch error unchanged, or `WriteFailed` if the temporary
    /// file cannot be written or moved into place.
    pub fn replace(&self, source_url: &str, file: &Path) -> PomkitResult<()> {
        let text = self.fetch_text(source_url)?;
        write_atomically(file, text.as_bytes())?;
        debug!(url = %source_url, path = %file.display(), bytes = text.len(), "Replaced file content");
        Ok(())
    }
}

fn read_chunked(reader: &mut impl Read) -> io::Result<Vec<u8>> {
    let mut content = Vec::with_capacity(FETCH_CHUNK_SIZE);
    let mut buffer = [0u8; FETCH_CHUNK_SIZE];

    loop {
        match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => content.extend_from_slice(&buffer[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    Ok(content)
}

fn write_atomically(target: &Path, content: &[u8]) -> PomkitResult<()> {
    let write_failed = |source: io::Error| PomkitError::WriteFailed {
        path: target.to_path_buf(),
        source,
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let original_perms = fs::metadata(target)
        .ok()
        .filter(|m| m.is_file())
        .map(|m| m.permissions());

    let mut temp_file = NamedTempFile::new_in(dir).map_err(write_failed)?;
    temp_file.write_all(content).map_err(write_failed)?;
    temp_file.flush().map_err(write_failed)?;
    temp_file.as_file().sync_all().map_err(write_failed)?;

    // On failure the returned handle is dropped, which removes the temp file.
    temp_file.persist(target).map_err(|e| write_failed(e.error))?;

    if let Some(perms) = original_perms {
        if let Err(e) = fs::set_permissions(target, perms) {
            warn!(path = %target.display(), error = %e, "Failed to restore permissions");
        }
    }

    Ok(())
}
