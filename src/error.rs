//! # Error Handling
//!
//! This module defines the centralized error type for `yaml-folder`. It uses
//! the `thiserror` library to build a single `Error` enum covering every
//! failure the resolver can report, each carrying enough context (file path,
//! option name, actual value kind) to point the user at the offending input.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum for all failures inside the library.
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into four groups:
//!
//! - Shape errors (`TypeMismatch`): a document or value had the wrong kind.
//! - Configuration errors (`ConfigParse`, `ConfigOption`,
//!   `InvalidInventoryPath`): raised before any traversal starts.
//! - I/O and parse errors (`Io`, `YamlParse`): reported with the file path.
//! - Lookup and output errors (`HostNotFound`, `Serialization`, `Json`).
//!
//! Lookup misses inside the resolver (for example, no ancestor tree-level
//! group) are not errors and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for yaml-folder operations
#[derive(Error, Debug)]
pub enum Error {
    /// A value or document had the wrong kind.
    ///
    /// `actual` is a familiar kind name such as `string` or `list`, never a
    /// loader-specific type name.
    #[error("Type mismatch in {}: {description} must be a {expected}, got {actual}", path.display())]
    TypeMismatch {
        description: String,
        expected: &'static str,
        actual: &'static str,
        path: PathBuf,
    },

    /// The marker file could not be interpreted as configuration.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An option received a value of the wrong type.
    #[error("Invalid value {value:?} for option '{key}' (from {origin}): expected {expected}")]
    ConfigOption {
        key: String,
        value: String,
        expected: &'static str,
        /// Where the value came from, e.g. an environment variable name
        origin: String,
    },

    /// The inventory path is neither a directory nor a marker file.
    #[error("Invalid inventory path {}: {message}", path.display())]
    InvalidInventoryPath { path: PathBuf, message: String },

    /// A YAML file could not be parsed.
    #[error("YAML parsing error in {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// An I/O error while reading the inventory tree.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory listing failed part way through.
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A host was requested that the inventory does not contain.
    #[error("Host not found: {name}")]
    HostNotFound { name: String },

    /// The inventory sink was asked to modify a host or group it does not know.
    #[error("Inventory error: unknown {kind} '{name}'")]
    UnknownEntity { kind: &'static str, name: String },

    /// A resolved value could not be represented in the output format.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an I/O error with the path that produced it.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
