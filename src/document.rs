//! # YAML Document Loading
//!
//! Every YAML file in an inventory tree enters the resolver through
//! [`load_document`], which returns a [`Document`]: a small tagged union of
//! the three shapes the resolver cares about. Callers pattern-match on the
//! shape instead of probing a raw `serde_yaml::Value` at each use site.
//!
//! YAML tags (`!vault ...`, custom tags) are looked through: a tagged mapping
//! is a `Mapping`, a tagged scalar is a `Scalar`.

use serde_yaml::{Mapping, Sequence, Value as YamlValue};
use std::path::Path;

use crate::error::{Error, Result};
use crate::validation::kind_name;

/// A parsed YAML document, classified by its top-level shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A mapping of keys to values
    Mapping(Mapping),
    /// A sequence of values
    Sequence(Sequence),
    /// Anything else: strings, numbers, booleans, null
    Scalar(YamlValue),
}

impl Document {
    /// Classify a value, unwrapping any YAML tags first.
    pub fn from_value(value: YamlValue) -> Self {
        match value {
            YamlValue::Mapping(map) => Document::Mapping(map),
            YamlValue::Sequence(seq) => Document::Sequence(seq),
            YamlValue::Tagged(tagged) => {
                let inner = *tagged;
                Document::from_value(inner.value)
            }
            scalar => Document::Scalar(scalar),
        }
    }

    /// The familiar kind name of this document, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Document::Mapping(_) => "mapping",
            Document::Sequence(_) => "list",
            Document::Scalar(value) => kind_name(value),
        }
    }

    /// Whether the document is empty (an empty file or an explicit `~`).
    pub fn is_null(&self) -> bool {
        matches!(self, Document::Scalar(YamlValue::Null))
    }

    /// Convert back into a plain YAML value.
    pub fn into_value(self) -> YamlValue {
        match self {
            Document::Mapping(map) => YamlValue::Mapping(map),
            Document::Sequence(seq) => YamlValue::Sequence(seq),
            Document::Scalar(value) => value,
        }
    }
}

/// Parse YAML text into a [`Document`].
///
/// Blank or comment-only input is an empty document (`Scalar(Null)`).
/// `path` is only used to annotate parse errors.
pub fn parse_document(content: &str, path: &Path) -> Result<Document> {
    let value: YamlValue = serde_yaml::from_str(content).map_err(|source| Error::YamlParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Document::from_value(value))
}

/// Read and parse a YAML file.
pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    if content.trim().is_empty() {
        return Ok(Document::Scalar(YamlValue::Null));
    }
    parse_document(&content, path)
}

/// Whether a file name carries a YAML extension (`.yml` or `.yaml`).
pub fn is_yaml_file_name(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yml" || ext == "yaml")
}
