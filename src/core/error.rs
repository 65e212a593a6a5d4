//! Error types for data file loading.

use thiserror::Error;

/// Errors that can occur when loading config, level or enemy data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// A level references an enemy type that has no definition.
    #[error("Level '{level}' references unknown enemy type '{enemy_type}'")]
    UnknownEnemyType { level: String, enemy_type: String },

    /// A patrol path or zone has an invalid shape.
    #[error("Invalid {what} in level '{level}': {details}")]
    InvalidShape {
        level: String,
        what: &'static str,
        details: String,
    },
}
