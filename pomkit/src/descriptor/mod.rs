//! Project descriptor (`pom.xml`) element extraction.
//!
//! A descriptor is parsed once per call and every requested [`ElementPath`]
//! is evaluated against that single document. Any path that selects nothing
//! aborts the whole call; partial results are never returned.

mod decode;
mod path;

pub use path::ElementPath;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use roxmltree::{Document, ParsingOptions};
use tracing::debug;

use crate::error::{PomkitError, PomkitResult};
use crate::probe::PathProbe;
use decode::decode_descriptor;

/// Text content keyed by the path expression that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementMap {
    entries: HashMap<String, String>,
}

impl ElementMap {
    /// Text found for `expression`.
    pub fn get(&self, expression: &str) -> Option<&str> {
        self.entries.get(expression).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(expression, text)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Remove and return the text for `expression`.
    pub fn take(&mut self, expression: &str) -> Option<String> {
        self.entries.remove(expression)
    }
}

/// Reads element text from project descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorReader {
    probe: PathProbe,
}

impl DescriptorReader {
    /// Create a reader that gates on `probe` before parsing.
    pub fn new(probe: PathProbe) -> Self {
        Self { probe }
    }

    /// Extract the text content at each of `element_paths`.
    ///
    /// # Errors
    ///
    /// - `MissingDescriptor` if the probe reports the file absent.
    /// - `InvalidElementPath` for an unsupported path expression.
    /// - `ReadFailed` if the file cannot be read. In dev-mode this is what an
    ///   absent descriptor produces, since the existence gate lets it through.
    /// - `DescriptorParse` if the document is malformed or its bytes do not
    ///   match the encoding given by its byte order mark or XML declaration.
    /// - `MissingDescriptorElement` for the first path that selects nothing.
    pub fn read_elements(&self, path: &Path, element_paths: &[&str]) -> PomkitResult<ElementMap> {
        if !self.probe.file_exists(path) {
            return Err(PomkitError::MissingDescriptor {
                path: path.to_path_buf(),
            });
        }

        let compiled = element_paths
            .iter()
            .map(|expr| ElementPath::parse(expr))
            .collect::<PomkitResult<Vec<_>>>()?;

        let bytes = fs::read(path).map_err(|e| PomkitError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
        let text = decode_descriptor(&bytes, path)?;

        // Internal DTD subsets are expanded; external ones are never fetched.
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(&text, options).map_err(|e| {
            PomkitError::DescriptorParse {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;
        debug!(path = %path.display(), elements = compiled.len(), "Parsed project descriptor");

        let mut entries = HashMap::with_capacity(compiled.len());
        for element in &compiled {
            let value = lookup(&doc, element, path)?;
            entries.insert(element.as_str().to_string(), value);
        }

        Ok(ElementMap { entries })
    }
}

/// Evaluate one path against an already parsed document.
fn lookup(doc: &Document<'_>, element: &ElementPath, descriptor: &Path) -> PomkitResult<String> {
    element
        .text(doc)
        .ok_or_else(|| PomkitError::MissingDescriptorElement {
            element: element.as_str().to_string(),
            descriptor: descriptor.to_path_buf(),
        })
}
