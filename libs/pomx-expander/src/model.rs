//! The expansion engine entry point.

use std::io::Write;
use std::path::Path;

use pomx_repository::{Coordinate, Resolver};
use pomx_xml::Document;

use crate::error::{Error, Result};
use crate::pipeline::{self, PassContext};

/// A pomx descriptor and, once requested, its expansion into a Maven POM.
///
/// The input document is never modified. The first call to
/// [`expanded`](Self::expanded) runs the pipeline on a copy and keeps the
/// result; later calls return the same document.
pub struct ProjectObjectModel<'r> {
    input: Document,
    resolver: &'r dyn Resolver,
    chain: Vec<Coordinate>,
    /// `None` until the pipeline has run successfully.
    expansion: Option<Document>,
}

impl<'r> ProjectObjectModel<'r> {
    pub fn new(input: Document, resolver: &'r dyn Resolver) -> Self {
        Self::with_chain(input, resolver, Vec::new())
    }

    /// Parse a descriptor held in memory; its provenance reads `inline`.
    pub fn parse(xml: &str, resolver: &'r dyn Resolver) -> Result<Self> {
        Ok(Self::new(Document::parse(xml)?, resolver))
    }

    pub fn read_from(path: &Path, resolver: &'r dyn Resolver) -> Result<Self> {
        Ok(Self::new(Document::load(path)?, resolver))
    }

    pub(crate) fn with_chain(
        input: Document,
        resolver: &'r dyn Resolver,
        chain: Vec<Coordinate>,
    ) -> Self {
        Self {
            input,
            resolver,
            chain,
            expansion: None,
        }
    }

    pub fn input(&self) -> &Document {
        &self.input
    }

    pub fn is_expanded(&self) -> bool {
        self.expansion.is_some()
    }

    pub fn expanded(&mut self) -> Result<&Document> {
        let output = match self.expansion.take() {
            Some(output) => output,
            None => expand(&self.input, self.resolver, &self.chain)?,
        };
        Ok(self.expansion.insert(output))
    }

    pub fn into_expanded(self) -> Result<Document> {
        match self.expansion {
            Some(output) => Ok(output),
            None => expand(&self.input, self.resolver, &self.chain),
        }
    }

    pub fn to_xml_string(&mut self) -> Result<String> {
        Ok(self.expanded()?.to_xml_string()?)
    }

    /// Write the expanded document to `path`, replacing any existing file.
    ///
    /// The content goes to a temporary file in the destination directory
    /// first and is renamed into place, so readers never see a partial file.
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        let xml = self.to_xml_string()?;
        let io_error = |source: std::io::Error| Error::Io {
            path: path.display().to_string(),
            source,
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = tempfile::NamedTempFile::new_in(dir).map_err(io_error)?;
        file.write_all(xml.as_bytes()).map_err(io_error)?;
        file.persist(path).map_err(|e| io_error(e.error))?;
        tracing::debug!(path = %path.display(), "wrote expanded descriptor");
        Ok(())
    }
}

fn expand(input: &Document, resolver: &dyn Resolver, chain: &[Coordinate]) -> Result<Document> {
    let mut output = input.clone();
    let mut cx = PassContext::nested(&mut output, resolver, chain);
    pipeline::run(&mut cx)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomx_repository::ResolveError;
    use std::path::PathBuf;

    fn no_profiles(gav: &Coordinate, _: &str) -> pomx_repository::Result<PathBuf> {
        Err(ResolveError::Unavailable(format!("no profile {gav}")))
    }

    #[test]
    fn input_is_left_untouched() {
        let xml = "<project><jar>g:a:1</jar></project>";
        let mut pom = ProjectObjectModel::parse(xml, &no_profiles).unwrap();
        pom.expanded().unwrap();

        let input = pom.input();
        assert!(input.child(input.root(), "jar").is_some());
        assert!(input.child(input.root(), "modelVersion").is_none());
    }

    #[test]
    fn expansion_is_memoized() {
        let mut pom = ProjectObjectModel::parse("<project/>", &no_profiles).unwrap();
        assert!(!pom.is_expanded());

        let first = pom.to_xml_string().unwrap();
        assert!(pom.is_expanded());
        let second = pom.to_xml_string().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.matches("WARNING").count(), 1);
    }

    #[test]
    fn into_expanded_returns_the_memo() {
        let mut pom = ProjectObjectModel::parse("<project><jar>g:a:1</jar></project>", &no_profiles).unwrap();
        let memo = pom.to_xml_string().unwrap();

        let owned = pom.into_expanded().unwrap();
        assert_eq!(owned.to_xml_string().unwrap(), memo);
    }

    #[test]
    fn failed_expansion_stays_pending() {
        let xml = "<project><jar>g:a:1</jar><war>g:a:1</war></project>";
        let mut pom = ProjectObjectModel::parse(xml, &no_profiles).unwrap();

        assert!(pom.expanded().is_err());
        assert!(!pom.is_expanded());
    }

    #[test]
    fn resolver_errors_propagate() {
        let xml = "<project><profile>g:p:1</profile></project>";
        let err = ProjectObjectModel::parse(xml, &no_profiles)
            .unwrap()
            .into_expanded()
            .unwrap_err();
        assert!(matches!(err, Error::Resolution(ResolveError::Unavailable(_))));
    }
}
