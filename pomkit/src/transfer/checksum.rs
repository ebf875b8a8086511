//! Content digests for integrity checks.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use md5::{Digest, Md5};
use tracing::debug;

use crate::error::{PomkitError, PomkitResult};

/// Buffer size for reading files during digest calculation (8KB).
const BUFFER_SIZE: usize = 8 * 1024;

/// Digest algorithm used to compare local files with published checksums.
///
/// Only MD5 is available. It matches the `.md5` files that repositories
/// publish next to each artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DigestAlgorithm {
    #[default]
    Md5,
}

impl DigestAlgorithm {
    /// Look up an algorithm by its conventional name (`"MD5"`).
    ///
    /// # Errors
    ///
    /// Returns `DigestUnavailable` for any other name.
    pub fn from_name(name: &str) -> PomkitResult<Self> {
        if name.trim().eq_ignore_ascii_case("md5") {
            Ok(Self::Md5)
        } else {
            Err(PomkitError::DigestUnavailable {
                algorithm: name.to_string(),
            })
        }
    }

    /// Conventional name of the algorithm.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
        }
    }

    /// Digest everything `reader` yields, as uppercase hex.
    pub fn digest_reader(&self, reader: &mut impl Read) -> io::Result<String> {
        match self {
            Self::Md5 => {
                let mut hasher = Md5::new();
                feed(&mut hasher, reader)?;
                Ok(format!("{:X}", hasher.finalize()))
            }
        }
    }
}

impl FromStr for DigestAlgorithm {
    type Err = PomkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn feed<D: Digest>(hasher: &mut D, reader: &mut impl Read) -> io::Result<()> {
    let mut buffer = vec![0u8; BUFFER_SIZE];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }
    Ok(())
}

/// Calculate the digest of a file without loading it into memory.
///
/// # Returns
///
/// The uppercase hexadecimal digest of the file contents.
///
/// # Errors
///
/// Returns `ReadFailed` if the file cannot be opened or read.
pub fn calculate_file_digest(path: &Path, algorithm: DigestAlgorithm) -> PomkitResult<String> {
    let mut file = File::open(path).map_err(|e| PomkitError::ReadFailed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let digest = algorithm
        .digest_reader(&mut file)
        .map_err(|e| PomkitError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

    debug!(path = %path.display(), algorithm = %algorithm, digest = %digest, "Computed file digest");
    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_md5_of_known_content() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "test.txt", b"hello world");

        let digest = calculate_file_digest(&path, DigestAlgorithm::Md5).unwrap();

        // MD5 of "hello world"
        assert_eq!(digest, "5EB63BBBE01EEED093CB22BB8F5ACDC3");
    }

    #[test]
    fn test_md5_of_empty_file() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "empty.txt", b"");

        let digest = calculate_file_digest(&path, DigestAlgorithm::Md5).unwrap();

        assert_eq!(digest, "D41D8CD98F00B204E9800998ECF8427E");
    }

    #[test]
    fn test_digest_spans_multiple_buffers() {
        let temp = TempDir::new().unwrap();
        let data = vec![0xABu8; BUFFER_SIZE * 3 + 17];
        let path = write_file(&temp, "large.bin", &data);

        let from_file = calculate_file_digest(&path, DigestAlgorithm::Md5).unwrap();
        let from_memory = DigestAlgorithm::Md5
            .digest_reader(&mut data.as_slice())
            .unwrap();

        assert_eq!(from_file, from_memory);
        assert_eq!(from_file.len(), 32);
    }

    #[test]
    fn test_missing_file_is_read_failure() {
        let temp = TempDir::new().unwrap();
        let result = calculate_file_digest(&temp.path().join("nope"), DigestAlgorithm::Md5);

        assert!(matches!(result, Err(PomkitError::ReadFailed { .. })));
    }

    #[test]
    fn test_algorithm_lookup() {
        assert_eq!(DigestAlgorithm::from_name("MD5").unwrap(), DigestAlgorithm::Md5);
        assert_eq!("md5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);

        match DigestAlgorithm::from_name("SHA-512") {
            Err(PomkitError::DigestUnavailable { algorithm }) => assert_eq!(algorithm, "SHA-512"),
            other => panic!("Expected DigestUnavailable, got {:?}", other),
        }
    }

    mod proptest_tests {
        use crate::transfer::checksum::DigestAlgorithm;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn digest_is_deterministic_and_byte_sensitive(
                data in proptest::collection::vec(any::<u8>(), 1..4096),
                index in any::<prop::sample::Index>(),
                flip in 1u8..=255,
            ) {
                let first = DigestAlgorithm::Md5.digest_reader(&mut data.as_slice()).unwrap();
                let second = DigestAlgorithm::Md5.digest_reader(&mut data.as_slice()).unwrap();
                prop_assert_eq!(&first, &second);

                let mut mutated = data.clone();
                let i = index.index(mutated.len());
                mutated[i] ^= flip;
                let changed = DigestAlgorithm::Md5.digest_reader(&mut mutated.as_slice()).unwrap();
                prop_assert_ne!(first, changed);
            }
        }
    }
}
