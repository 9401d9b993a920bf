//! Error types for pomx expansion

use pomx_repository::{CoordinateError, ResolveError};
use pomx_xml::XmlError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    MalformedCoordinate(#[from] CoordinateError),

    #[error("multiple packagings found: {}", .0.join(", "))]
    MultiplePackagings(Vec<String>),

    #[error("Document error: {0}")]
    Document(#[from] XmlError),

    #[error("Resolution error: {0}")]
    Resolution(#[from] ResolveError),

    #[error("Profile cycle: {0}")]
    ProfileCycle(String),

    #[error("IO error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
