//! Resolver trait for mapping coordinates to readable documents

use std::path::PathBuf;

use crate::coordinate::Coordinate;
use crate::error::Result;

/// Maps a coordinate and an artifact type (`xml`, `pom`, `jar`, ...) to the
/// location of a readable file.
///
/// Implementations decide where artifacts live; the expansion engine only
/// consumes the returned path. Closures with the matching signature are
/// resolvers too, which keeps tests short:
///
/// ```rust
/// use pomx_repository::{Coordinate, Resolver, ResolveError};
/// use std::path::{Path, PathBuf};
///
/// let base = Path::new("/srv/profiles");
/// let resolver = |gav: &Coordinate, kind: &str| -> Result<PathBuf, ResolveError> {
///     Ok(base.join(gav.repository_path(kind)?))
/// };
/// let gav = Coordinate::parse("g:p:1.0").unwrap();
/// assert_eq!(
///     resolver.resolve(&gav, "xml").unwrap(),
///     Path::new("/srv/profiles/g/p/1.0/p-1.0.xml")
/// );
/// ```
pub trait Resolver: Send + Sync {
    fn resolve(&self, coordinate: &Coordinate, artifact_type: &str) -> Result<PathBuf>;
}

impl<F> Resolver for F
where
    F: Fn(&Coordinate, &str) -> Result<PathBuf> + Send + Sync,
{
    fn resolve(&self, coordinate: &Coordinate, artifact_type: &str) -> Result<PathBuf> {
        self(coordinate, artifact_type)
    }
}
