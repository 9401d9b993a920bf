//! Artifact coordinates: `groupId:artifactId[:classifier][:version]`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::CoordinateError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group_id: String,
    artifact_id: String,
    classifier: Option<String>,
    version: Option<String>,
}

impl Coordinate {
    /// Parse a colon-separated coordinate.
    ///
    /// - `g:a` → group and artifact only
    /// - `g:a:v` → with version
    /// - `g:a:c:v` → with classifier and version
    ///
    /// Segments are taken verbatim; only their number is checked.
    pub fn parse(expression: &str) -> Result<Self, CoordinateError> {
        let segments: Vec<&str> = expression.split(':').collect();
        match segments.as_slice() {
            [group, artifact] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                classifier: None,
                version: None,
            }),
            [group, artifact, version] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                classifier: None,
                version: Some(version.to_string()),
            }),
            [group, artifact, classifier, version] => Ok(Self {
                group_id: group.to_string(),
                artifact_id: artifact.to_string(),
                classifier: Some(classifier.to_string()),
                version: Some(version.to_string()),
            }),
            [] | [_] => Err(CoordinateError::TooFewElements {
                count: segments.len(),
                expression: expression.to_string(),
            }),
            _ => Err(CoordinateError::TooManyElements {
                count: segments.len(),
                expression: expression.to_string(),
            }),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// `groupId:artifactId`
    pub fn key(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }

    /// Version, or `MissingVersion` naming this coordinate.
    pub fn require_version(&self) -> Result<&str, CoordinateError> {
        self.version()
            .ok_or_else(|| CoordinateError::MissingVersion(self.to_string()))
    }

    /// Relative storage path inside a repository:
    /// `group/as/dirs/artifactId/version/artifactId-version.type`.
    pub fn repository_path(&self, artifact_type: &str) -> Result<PathBuf, CoordinateError> {
        let version = self.require_version()?;
        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(version);
        path.push(format!("{}-{}.{}", self.artifact_id, version, artifact_type));
        Ok(path)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        if let Some(version) = &self.version {
            write!(f, ":{}", version)?;
        }
        Ok(())
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
