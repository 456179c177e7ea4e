//! Error types for schema loading and document assembly.

use std::path::PathBuf;
use thiserror::Error;

/// Errors during document assembly.
///
/// Assembly is pure computation: every error is raised synchronously at the
/// point of detection and aborts the document entirely. A failed call
/// produces no output. Missing relationship data (absent foreign key, empty
/// pool entry) is a normal outcome, not an error.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("you must provide at least one schema when constructing a parser")]
    EmptyRegistry,

    #[error("no schema found for type {type_name}")]
    UnknownType { type_name: String },

    #[error(
        "{parent} specified a {field} relationship through the {through} table, \
         but the {through} schema does not define a {key} property"
    )]
    MissingThroughProperty {
        parent: String,
        field: String,
        through: String,
        key: String,
    },

    #[error(
        "{parent} specified a {field} relationship through the {through} table, \
         but the {key} property does not define a valid type"
    )]
    InvalidThroughType {
        parent: String,
        field: String,
        through: String,
        key: String,
    },
}

impl AssembleError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        // Every assembly failure is a schema/configuration error
        2
    }
}

/// Errors while discovering and parsing schema files.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("schema directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parse errors (exit code 2)
    #[error("failed parsing {name} schema at {path}: {source}")]
    InvalidSchema {
        name: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::DirectoryNotFound { .. } | LoadError::ReadError { .. } => 3,
            LoadError::InvalidSchema { .. } => 2,
        }
    }
}
