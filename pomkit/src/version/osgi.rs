//! Module-style versions and interval ranges.
//!
//! Versions have the form `major[.minor[.micro[.qualifier]]]`. Missing numeric
//! segments are zero and the qualifier defaults to empty; an empty or blank
//! string is the empty version `0.0.0`. Ranges use interval
//! notation with `[`/`]` for inclusive and `(`/`)` for exclusive bounds, e.g.
//! `[1.0,2.0)`. A bare version such as `1.0` means "at least 1.0".

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::VersionScheme;
use crate::error::{PomkitError, PomkitResult};

/// A parsed, comparable version.
///
/// Ordering compares `major`, `minor` and `micro` numerically, then the
/// qualifier as a plain string. An empty qualifier sorts before any other,
/// so `1.0.0 < 1.0.0.beta`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub micro: u64,
    pub qualifier: String,
}

impl Version {
    /// Create a version without a qualifier.
    pub fn new(major: u64, minor: u64, micro: u64) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: String::new(),
        }
    }

    /// Parse a version string.
    ///
    /// # Errors
    ///
    /// Returns `MalformedVersionExpression` for non-numeric or empty numeric
    /// segments, or a qualifier containing characters other than ASCII
    /// letters, digits, `_` and `-`.
    pub fn parse(input: &str) -> PomkitResult<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Ok(Self::new(0, 0, 0));
        }

        let mut parts = text.splitn(4, '.');
        let major = parse_segment(input, parts.next(), "major")?;
        let minor = match parts.next() {
            Some(s) => parse_segment(input, Some(s), "minor")?,
            None => 0,
        };
        let micro = match parts.next() {
            Some(s) => parse_segment(input, Some(s), "micro")?,
            None => 0,
        };
        let qualifier = match parts.next() {
            Some(q) => {
                validate_qualifier(input, q)?;
                q.to_string()
            }
            None => String::new(),
        };

        Ok(Self {
            major,
            minor,
            micro,
            qualifier,
        })
    }
}

fn parse_segment(input: &str, segment: Option<&str>, name: &str) -> PomkitResult<u64> {
    let segment = segment.unwrap_or_default();
    if segment.is_empty() {
        return Err(PomkitError::malformed_version(
            input,
            format!("empty {} segment", name),
        ));
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PomkitError::malformed_version(
            input,
            format!("{} segment '{}' is not a number", name, segment),
        ));
    }
    segment.parse::<u64>().map_err(|e| {
        PomkitError::malformed_version(input, format!("{} segment '{}': {}", name, segment, e))
    })
}

fn validate_qualifier(input: &str, qualifier: &str) -> PomkitResult<()> {
    if qualifier.is_empty() {
        return Err(PomkitError::malformed_version(input, "empty qualifier"));
    }
    if let Some(c) = qualifier
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(PomkitError::malformed_version(
            input,
            format!("invalid character '{}' in qualifier", c),
        ));
    }
    Ok(())
}

impl FromStr for Version {
    type Err = PomkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if !self.qualifier.is_empty() {
            write!(f, ".{}", self.qualifier)?;
        }
        Ok(())
    }
}

/// An interval of versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    left: Version,
    left_closed: bool,
    right: Option<Version>,
    right_closed: bool,
}

impl VersionRange {
    /// Range containing `version` and everything above it.
    pub fn at_least(version: Version) -> Self {
        Self {
            left: version,
            left_closed: true,
            right: None,
            right_closed: false,
        }
    }

    /// Bounded interval.
    pub fn between(left: Version, left_closed: bool, right: Version, right_closed: bool) -> Self {
        Self {
            left,
            left_closed,
            right: Some(right),
            right_closed,
        }
    }

    /// Parse a range expression.
    ///
    /// # Errors
    ///
    /// Returns `MalformedVersionExpression` when the bound markers are
    /// unbalanced, the interval does not have exactly two endpoints, or an
    /// endpoint is not a valid version.
    pub fn parse(input: &str) -> PomkitResult<Self> {
        let text = input.trim();
        if text.is_empty() {
            return Err(PomkitError::malformed_version(input, "empty range"));
        }

        let left_closed = match text.as_bytes()[0] {
            b'[' => true,
            b'(' => false,
            _ => {
                let version = Version::parse(text)
                    .map_err(|e| PomkitError::malformed_version(input, reason_of(e)))?;
                return Ok(Self::at_least(version));
            }
        };

        let right_closed = match text.as_bytes()[text.len() - 1] {
            b']' if text.len() > 1 => true,
            b')' if text.len() > 1 => false,
            _ => {
                return Err(PomkitError::malformed_version(
                    input,
                    "missing closing ']' or ')'",
                ))
            }
        };

        let body = &text[1..text.len() - 1];
        let mut endpoints = body.split(',');
        let (left, right) = match (endpoints.next(), endpoints.next(), endpoints.next()) {
            (Some(l), Some(r), None) => (l, r),
            _ => {
                return Err(PomkitError::malformed_version(
                    input,
                    "interval must have exactly two endpoints separated by ','",
                ))
            }
        };

        if left.trim().is_empty() || right.trim().is_empty() {
            return Err(PomkitError::malformed_version(input, "empty interval endpoint"));
        }
        let left = Version::parse(left)
            .map_err(|e| PomkitError::malformed_version(input, reason_of(e)))?;
        let right = Version::parse(right)
            .map_err(|e| PomkitError::malformed_version(input, reason_of(e)))?;

        Ok(Self::between(left, left_closed, right, right_closed))
    }

    /// Lower bound.
    pub fn left(&self) -> &Version {
        &self.left
    }

    /// Upper bound, `None` when unbounded.
    pub fn right(&self) -> Option<&Version> {
        self.right.as_ref()
    }

    /// Whether `version` falls inside this range.
    pub fn includes(&self, version: &Version) -> bool {
        let above_left = match version.cmp(&self.left) {
            Ordering::Greater => true,
            Ordering::Equal => self.left_closed,
            Ordering::Less => false,
        };
        if !above_left {
            return false;
        }
        match &self.right {
            None => true,
            Some(right) => match version.cmp(right) {
                Ordering::Less => true,
                Ordering::Equal => self.right_closed,
                Ordering::Greater => false,
            },
        }
    }

    /// `true` when no version can satisfy this range.
    pub fn is_empty(&self) -> bool {
        match &self.right {
            None => false,
            Some(right) => match self.left.cmp(right) {
                Ordering::Greater => true,
                Ordering::Equal => !(self.left_closed && self.right_closed),
                Ordering::Less => false,
            },
        }
    }
}

// Endpoint errors are re-reported against the whole range expression.
fn reason_of(err: PomkitError) -> String {
    match err {
        PomkitError::MalformedVersionExpression { expression, reason } => {
            format!("'{}': {}", expression.trim(), reason)
        }
        other => other.to_string(),
    }
}

impl FromStr for VersionRange {
    type Err = PomkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.right {
            None => write!(f, "{}", self.left),
            Some(right) => write!(
                f,
                "{}{},{}{}",
                if self.left_closed { '[' } else { '(' },
                self.left,
                right,
                if self.right_closed { ']' } else { ')' }
            ),
        }
    }
}

/// Interval range syntax used by module systems (`[1.0,2.0)`).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsgiScheme;

impl VersionScheme for OsgiScheme {
    fn name(&self) -> &'static str {
        "osgi"
    }

    fn matches(&self, version: &str, range: &str) -> PomkitResult<bool> {
        let range = VersionRange::parse(range)?;
        let version = Version::parse(version)?;
        Ok(range.includes(&version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_parse_full_version() {
        let v = Version::parse("1.2.3.RC1").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.micro, 3);
        assert_eq!(v.qualifier, "RC1");
        assert_eq!(v.to_string(), "1.2.3.RC1");
    }

    #[test]
    fn test_parse_partial_version_defaults_to_zero() {
        assert_eq!(Version::parse("1").unwrap(), Version::new(1, 0, 0));
        assert_eq!(Version::parse(" 2.5 ").unwrap(), Version::new(2, 5, 0));
    }

    #[test]
    fn test_parse_rejects_malformed_versions() {
        for input in ["a.b", "1..2", "1.0.0.", "1.0.0.beta+1", "-1.0", "1.0-SNAPSHOT"] {
            let err = Version::parse(input).unwrap_err();
            assert_eq!(
                err.category(),
                ErrorCategory::MalformedVersionExpression,
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_blank_version_is_empty_version() {
        assert_eq!(Version::parse("").unwrap(), Version::new(0, 0, 0));
        assert_eq!(Version::parse("  ").unwrap(), Version::new(0, 0, 0));
        assert!(OsgiScheme.matches("", "[0.0,1.0)").unwrap());
        assert!(!OsgiScheme.matches("", "(0.0,1.0)").unwrap());
    }

    #[test]
    fn test_qualifier_ordering() {
        let plain = Version::parse("1.0.0").unwrap();
        let beta = Version::parse("1.0.0.beta").unwrap();
        let rc = Version::parse("1.0.0.rc").unwrap();
        assert!(plain < beta);
        assert!(beta < rc);
        assert!(rc < Version::new(1, 0, 1));
    }

    #[test]
    fn test_numeric_ordering_is_not_lexical() {
        assert!(Version::parse("1.10.0").unwrap() > Version::parse("1.9.0").unwrap());
    }

    #[test]
    fn test_half_open_range() {
        let range = VersionRange::parse("[1.0,2.0)").unwrap();
        assert!(range.includes(&Version::parse("1.0.0").unwrap()));
        assert!(range.includes(&Version::parse("1.5.0").unwrap()));
        assert!(range.includes(&Version::parse("1.99.99.z").unwrap()));
        assert!(!range.includes(&Version::parse("2.0.0").unwrap()));
        assert!(!range.includes(&Version::parse("0.9.9").unwrap()));
    }

    #[test]
    fn test_exclusive_left_inclusive_right() {
        let range = VersionRange::parse("(1.0, 2.0]").unwrap();
        assert!(!range.includes(&Version::new(1, 0, 0)));
        assert!(range.includes(&Version::new(1, 0, 1)));
        assert!(range.includes(&Version::new(2, 0, 0)));
        assert!(!range.includes(&Version::new(2, 0, 1)));
    }

    #[test]
    fn test_bare_version_is_at_least() {
        let range = VersionRange::parse("1.2").unwrap();
        assert!(range.right().is_none());
        assert!(range.includes(&Version::new(1, 2, 0)));
        assert!(range.includes(&Version::new(99, 0, 0)));
        assert!(!range.includes(&Version::new(1, 1, 9)));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = VersionRange::parse("[2.0,1.0]").unwrap();
        assert!(range.is_empty());
        assert!(!range.includes(&Version::new(1, 5, 0)));

        assert!(VersionRange::parse("[1.0,1.0)").unwrap().is_empty());
        assert!(!VersionRange::parse("[1.0,1.0]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_ranges() {
        for input in ["", "[1.0,2.0", "[1.0]", "[1.0,2.0,3.0)", "[x,2.0)", "[", "{1.0,2.0}", "[,2.0)", "[1.0, )"] {
            let err = VersionRange::parse(input).unwrap_err();
            assert_eq!(
                err.category(),
                ErrorCategory::MalformedVersionExpression,
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_range_display() {
        assert_eq!(
            VersionRange::parse("[1.0,2.0)").unwrap().to_string(),
            "[1.0.0,2.0.0)"
        );
        assert_eq!(VersionRange::parse("3").unwrap().to_string(), "3.0.0");
    }

    #[test]
    fn test_scheme_propagates_malformed_input() {
        let scheme = OsgiScheme;
        assert!(scheme.matches("1.5.0", "[1.0,2.0)").unwrap());
        assert!(scheme.matches("1.5.0", "[1.0,2.0").is_err());
        assert!(scheme.matches("one", "[1.0,2.0)").is_err());
    }

    mod proptest_tests {
        use crate::version::osgi::{Version, VersionRange};
        use proptest::prelude::*;

        fn version_strategy() -> impl Strategy<Value = Version> {
            (0u64..20, 0u64..20, 0u64..20).prop_map(|(a, b, c)| Version::new(a, b, c))
        }

        proptest! {
            #[test]
            fn display_parse_roundtrip(v in version_strategy()) {
                prop_assert_eq!(Version::parse(&v.to_string()).unwrap(), v);
            }

            #[test]
            fn bounds_follow_ordering(
                lo in version_strategy(),
                hi in version_strategy(),
                v in version_strategy(),
                left_closed in any::<bool>(),
                right_closed in any::<bool>(),
            ) {
                let range = VersionRange::between(lo.clone(), left_closed, hi.clone(), right_closed);
                let expected_left = if left_closed { v >= lo } else { v > lo };
                let expected_right = if right_closed { v <= hi } else { v < hi };
                prop_assert_eq!(range.includes(&v), expected_left && expected_right);
                if range.is_empty() {
                    prop_assert!(!range.includes(&v));
                }
            }
        }
    }
}
