//! Error types for the document model

use thiserror::Error;

pub type Result<T> = std::result::Result<T, XmlError>;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("XML parse error: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("XML read error: {0}")]
    Read(#[from] quick_xml::Error),

    #[error("XML write error: {0}")]
    Write(String),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path expression '{expression}': {reason}")]
    InvalidPath { expression: String, reason: String },

    #[error("Document has no root element")]
    MissingRoot,
}
