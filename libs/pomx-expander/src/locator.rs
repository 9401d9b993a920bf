//! Project descriptor lookup for build tooling.

use std::path::{Path, PathBuf};

use pomx_repository::Resolver;

use crate::error::Result;
use crate::model::ProjectObjectModel;

pub const POMX_FILE: &str = "pomx.xml";
pub const POM_FILE: &str = "pom.xml";

/// Return the `pom.xml` of a project directory, regenerating it from
/// `pomx.xml` first when the directory has one.
pub fn locate_project(dir: &Path, resolver: &dyn Resolver) -> Result<PathBuf> {
    let pom = dir.join(POM_FILE);
    let pomx = dir.join(POMX_FILE);
    if pomx.is_file() {
        tracing::info!("convert {} to {}", pomx.display(), pom.display());
        ProjectObjectModel::read_from(&pomx, resolver)?.write_to(&pom)?;
    }
    Ok(pom)
}
