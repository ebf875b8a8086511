//! Absolute element paths such as `/project/parent/version`.

use std::fmt;
use std::str::FromStr;

use roxmltree::{Document, Node};

use crate::error::{PomkitError, PomkitResult};

/// A parsed absolute path of element names.
///
/// Only the child axis is supported. Each step matches an element by local
/// name, so paths work whether or not the document declares a default
/// namespace (as `pom.xml` files usually do).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementPath {
    expression: String,
    steps: Vec<String>,
}

impl ElementPath {
    /// Parse a path expression.
    ///
    /// # Errors
    ///
    /// Returns `InvalidElementPath` if the expression is not absolute, uses
    /// the descendant axis (`//`), has an empty step, uses `.` or `..`, or
    /// contains characters that are not valid in an element name.
    pub fn parse(expression: &str) -> PomkitResult<Self> {
        let invalid = |reason: &str| PomkitError::InvalidElementPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let rest = expression
            .strip_prefix('/')
            .ok_or_else(|| invalid("path must be absolute"))?;
        if rest.starts_with('/') {
            return Err(invalid("descendant axis is not supported"));
        }

        let steps = rest
            .split('/')
            .map(|step| {
                if step.is_empty() {
                    return Err(invalid("empty step"));
                }
                if step.chars().all(|c| c == '.') {
                    return Err(invalid("relative steps are not supported"));
                }
                if !step
                    .chars()
                    .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
                {
                    return Err(invalid("only element names are supported"));
                }
                Ok(step.to_string())
            })
            .collect::<PomkitResult<Vec<_>>>()?;

        Ok(Self {
            expression: expression.to_string(),
            steps,
        })
    }

    /// The original expression.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// Element names from the root down.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    /// First element in document order that this path selects.
    pub fn select<'a, 'input>(&self, doc: &'a Document<'input>) -> Option<Node<'a, 'input>> {
        let root = doc.root_element();
        let (first, rest) = self.steps.split_first()?;
        if root.tag_name().name() != first.as_str() {
            return None;
        }
        find_first(root, rest)
    }

    /// Text content of the first selected element.
    ///
    /// This is the concatenation of every descendant text node, untrimmed.
    pub fn text<'input>(&self, doc: &Document<'input>) -> Option<String> {
        self.select(doc).map(|node| {
            node.descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect()
        })
    }
}

fn find_first<'a, 'input>(node: Node<'a, 'input>, steps: &[String]) -> Option<Node<'a, 'input>> {
    let Some((step, rest)) = steps.split_first() else {
        return Some(node);
    };
    node.children()
        .filter(|child| child.is_element() && child.tag_name().name() == step.as_str())
        .find_map(|child| find_first(child, rest))
}

impl FromStr for ElementPath {
    type Err = PomkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ElementPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
  <parent>
    <groupId>dev.appsody</groupId>
    <version>0.2.4</version>
  </parent>
  <groupId>com.example</groupId>
  <artifactId>demo</artifactId>
  <version>1.0-SNAPSHOT</version>
</project>"#;

    #[test]
    fn test_parse_steps() {
        let path = ElementPath::parse("/project/parent/groupId").unwrap();
        assert_eq!(path.steps(), ["project", "parent", "groupId"]);
        assert_eq!(path.to_string(), "/project/parent/groupId");
    }

    #[test]
    fn test_parse_rejects_unsupported_expressions() {
        for expr in ["project/version", "//version", "/project//version", "/project/", "/project/dependencies/dependency[1]", "/project/@id", "", "/project/.", "/project/..", "/./project", "/project/..."] {
            assert!(
                matches!(ElementPath::parse(expr), Err(PomkitError::InvalidElementPath { .. })),
                "{expr:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_select_ignores_default_namespace() {
        let doc = Document::parse(POM).unwrap();
        let path = ElementPath::parse("/project/version").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some("1.0-SNAPSHOT"));
    }

    #[test]
    fn test_select_nested_element() {
        let doc = Document::parse(POM).unwrap();
        let path = ElementPath::parse("/project/parent/groupId").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some("dev.appsody"));
    }

    #[test]
    fn test_select_missing_element() {
        let doc = Document::parse(POM).unwrap();
        assert!(ElementPath::parse("/project/parent/artifactId")
            .unwrap()
            .select(&doc)
            .is_none());
        assert!(ElementPath::parse("/pom/version").unwrap().select(&doc).is_none());
    }

    #[test]
    fn test_first_match_in_document_order() {
        let doc = Document::parse(
            "<project><module><name>a</name></module><module><name>b</name></module></project>",
        )
        .unwrap();
        let path = ElementPath::parse("/project/module/name").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some("a"));
    }

    #[test]
    fn test_first_match_skips_branches_without_target() {
        let doc = Document::parse(
            "<project><module/><module><name>b</name></module></project>",
        )
        .unwrap();
        let path = ElementPath::parse("/project/module/name").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some("b"));
    }

    #[test]
    fn test_text_is_untrimmed_and_concatenated() {
        let doc = Document::parse(
            "<project><version> 1.<!-- c -->0<![CDATA[.1]]> </version></project>",
        )
        .unwrap();
        let path = ElementPath::parse("/project/version").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some(" 1.0.1 "));
    }

    #[test]
    fn test_empty_element_has_empty_text() {
        let doc = Document::parse("<project><version/></project>").unwrap();
        let path = ElementPath::parse("/project/version").unwrap();
        assert_eq!(path.text(&doc).as_deref(), Some(""));
    }
}
