//! Expansion of shorthand `pomx.xml` descriptors into Maven `pom.xml` files.
//!
//! A [`ProjectObjectModel`] wraps an input document and a
//! [`Resolver`](pomx_repository::Resolver) for external profiles. Asking for
//! the expanded document runs the passes of [`PIPELINE`] once, on a copy of
//! the input:
//!
//! ```rust
//! use pomx_expander::ProjectObjectModel;
//! use pomx_repository::{Coordinate, ResolveError};
//! use std::path::PathBuf;
//!
//! let no_profiles = |gav: &Coordinate, _: &str| -> Result<PathBuf, ResolveError> {
//!     Err(ResolveError::Unavailable(gav.to_string()))
//! };
//! let mut pom = ProjectObjectModel::parse(
//!     "<project><jar>com.example:app:1.0</jar></project>",
//!     &no_profiles,
//! )
//! .unwrap();
//! let xml = pom.to_xml_string().unwrap();
//! assert!(xml.contains("<packaging>jar</packaging>"));
//! ```

pub mod error;
pub mod locator;
pub mod model;
mod passes;
pub mod pipeline;
pub mod vocabulary;

pub use error::{Error, Result};
pub use locator::{locate_project, POMX_FILE, POM_FILE};
pub use model::ProjectObjectModel;
pub use pipeline::{Pass, PassContext, PIPELINE};
