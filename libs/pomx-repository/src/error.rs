//! Error types for coordinates and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Coordinate parsing and path errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("too few elements {count} in GAV expression: '{expression}'")]
    TooFewElements { count: usize, expression: String },

    #[error("too many elements {count} in GAV expression: '{expression}'")]
    TooManyElements { count: usize, expression: String },

    #[error("coordinate '{0}' has no version")]
    MissingVersion(String),
}

/// Resolver errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Artifact not found: {coordinate} ({artifact_type}) at {}", path.display())]
    NotFound {
        coordinate: String,
        artifact_type: String,
        path: PathBuf,
    },

    #[error("Cannot resolve artifact: {0}")]
    Coordinate(#[from] CoordinateError),

    #[error("Repository unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
