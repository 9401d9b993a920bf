//! Resolver backed by a local, coordinate-addressed artifact directory
//! (the `~/.m2/repository` layout).

use std::path::{Path, PathBuf};

use crate::coordinate::Coordinate;
use crate::error::{ResolveError, Result};
use crate::resolver::Resolver;

/// Directory below the home directory that holds the user's repository.
pub const USER_REPOSITORY: &str = ".m2/repository";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$HOME/.m2/repository`
    pub fn user_default() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            ResolveError::Unavailable("cannot determine home directory".to_string())
        })?;
        Ok(Self::new(home.join(USER_REPOSITORY)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where an artifact would be stored, whether or not it exists.
    pub fn path_of(&self, coordinate: &Coordinate, artifact_type: &str) -> Result<PathBuf> {
        Ok(self.root.join(coordinate.repository_path(artifact_type)?))
    }
}

impl Resolver for LocalRepository {
    fn resolve(&self, coordinate: &Coordinate, artifact_type: &str) -> Result<PathBuf> {
        let path = self.path_of(coordinate, artifact_type)?;
        if !path.is_file() {
            return Err(ResolveError::NotFound {
                coordinate: coordinate.to_string(),
                artifact_type: artifact_type.to_string(),
                path,
            });
        }
        tracing::debug!(%coordinate, artifact_type, path = %path.display(), "resolved artifact");
        Ok(path)
    }
}
