//! YAML frontmatter for Markdown documents
//!
//! A document carries frontmatter when it starts with a `---` line, followed
//! by a (possibly empty) YAML block, a closing `---` line and the body. The
//! closing delimiter is the first one after the opening line.

use regex::Regex;
use serde_yaml::Value;
use std::sync::LazyLock;

static FRONTMATTER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---[^\S\n]*\n(?:(.*?)\n)??---[^\S\n]*\n(.*)\z")
        .expect("frontmatter pattern is valid")
});

#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Invalid YAML frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Split `content` into `(yaml_block, body)` when it opens with frontmatter.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let captures = FRONTMATTER_PATTERN.captures(content)?;
    let block = captures.get(1).map_or("", |m| m.as_str());
    let body = captures.get(2).map_or("", |m| m.as_str());
    Some((block, body))
}

/// Decoded frontmatter block.
///
/// Kept untyped: the only consumer is a best-effort lookup of a single key.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontmatterDocument(Value);

impl FrontmatterDocument {
    pub fn parse(block: &str) -> Result<Self, FrontmatterError> {
        Ok(FrontmatterDocument(serde_yaml::from_str(block)?))
    }

    /// Scalar value of `key` rendered as text.
    ///
    /// Returns `None` if the document is not a mapping or the key is absent.
    /// Non-scalar values count as absent, as do `false`, zero, NaN and the
    /// empty string.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()) => {
                Some(n.to_string())
            }
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}
