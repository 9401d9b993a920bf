//! Artifact coordinates and their resolution.
//!
//! A [`Coordinate`] is the compact `groupId:artifactId[:classifier][:version]`
//! form used throughout pomx documents. A [`Resolver`] turns a coordinate and
//! an artifact type into a path that can be read; [`LocalRepository`] does so
//! against a coordinate-addressed directory such as `~/.m2/repository`.
//!
//! ```rust,no_run
//! use pomx_repository::{Coordinate, LocalRepository, Resolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let repository = LocalRepository::user_default()?;
//! let gav: Coordinate = "com.github.t1:profile-java8:1.0".parse()?;
//! let path = repository.resolve(&gav, "xml")?;
//! # Ok(())
//! # }
//! ```

pub mod coordinate;
pub mod error;
pub mod local;
pub mod resolver;

pub use coordinate::Coordinate;
pub use error::{CoordinateError, ResolveError, Result};
pub use local::{LocalRepository, USER_REPOSITORY};
pub use resolver::Resolver;
