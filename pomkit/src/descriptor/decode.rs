//! Byte-to-text decoding for descriptor files.
//!
//! The encoding is taken from a byte order mark when present, otherwise from
//! the `encoding` pseudo-attribute of the XML declaration, otherwise UTF-8.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8};

use crate::error::{PomkitError, PomkitResult};

/// The XML declaration must appear within this many leading bytes.
const DECLARATION_SCAN_LIMIT: usize = 1024;

/// Decode the raw bytes of the descriptor at `path`.
///
/// # Errors
///
/// Returns `DescriptorParse` if the declared encoding is unknown or the bytes
/// are not valid in the selected encoding.
pub(crate) fn decode_descriptor(bytes: &[u8], path: &Path) -> PomkitResult<String> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes, path)?, bytes),
    };

    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(|text| text.into_owned())
        .ok_or_else(|| PomkitError::DescriptorParse {
            path: path.to_path_buf(),
            reason: format!("content is not valid {}", encoding.name()),
        })
}

fn declared_encoding(bytes: &[u8], path: &Path) -> PomkitResult<&'static Encoding> {
    let Some(label) = declaration_label(bytes) else {
        return Ok(UTF_8);
    };

    // A declaration readable as ASCII rules out UTF-16 without a BOM;
    // output_encoding() folds such labels back to UTF-8.
    Encoding::for_label(label)
        .map(Encoding::output_encoding)
        .ok_or_else(|| PomkitError::DescriptorParse {
            path: path.to_path_buf(),
            reason: format!(
                "unsupported encoding '{}'",
                String::from_utf8_lossy(label)
            ),
        })
}

/// Value of `encoding="..."` in a leading `<?xml ... ?>` declaration.
fn declaration_label(bytes: &[u8]) -> Option<&[u8]> {
    let head = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    let head = head.strip_prefix(b"<?xml")?;
    let end = head.windows(2).position(|w| w == b"?>")?;
    let declaration = &head[..end];

    let at = declaration.windows(8).position(|w| w == b"encoding")?;
    let rest = skip_whitespace(&declaration[at + 8..]);
    let rest = skip_whitespace(rest.strip_prefix(b"=")?);
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let len = rest.iter().position(|&b| b == quote)?;
    Some(&rest[..len])
}

fn skip_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    &bytes[start..]
}
