//! Root-level bookkeeping: namespace, model version, provenance comments.

use std::path::{Component, Path, PathBuf};

use pomx_xml::{Document, Origin, Position};

use crate::vocabulary::{MODEL_VERSION, POMX_NAMESPACE, POM_NAMESPACE, WARNING_COMMENT, XSI_NAMESPACE};

/// Switch a pomx root to the POM namespace and drop the pomx schema hint.
pub(crate) fn convert_namespace(doc: &mut Document) {
    let root = doc.root();
    if doc.attribute(root, "xmlns") != Some(POMX_NAMESPACE) {
        return;
    }
    doc.set_attribute(root, "xmlns", POM_NAMESPACE);
    doc.remove_attribute(root, "xsi:schemaLocation");

    let xsi_still_used = doc
        .attributes(root)
        .iter()
        .any(|(name, _)| name.starts_with("xsi:"));
    if !xsi_still_used && doc.attribute(root, "xmlns:xsi") == Some(XSI_NAMESPACE) {
        doc.remove_attribute(root, "xmlns:xsi");
    }
}

pub(crate) fn add_model_version(doc: &mut Document) {
    let root = doc.root();
    if doc.child(root, "modelVersion").is_none() {
        doc.add_text_element(root, "modelVersion", MODEL_VERSION, Position::Beginning);
    }
}

pub(crate) fn add_generated_warning(doc: &mut Document) {
    let root = doc.root();
    let source = format!("Generated from {}", source_of(doc.origin()));
    doc.add_comment(root, &source, Position::Beginning);
    doc.add_comment(root, WARNING_COMMENT, Position::Beginning);
}

fn source_of(origin: &Origin) -> String {
    match origin {
        Origin::File(path) => relative_to_working_dir(path).display().to_string(),
        other => other.to_string(),
    }
}

fn relative_to_working_dir(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => relative_path(&cwd.join(path), &cwd),
        Err(_) => path.to_path_buf(),
    }
}

/// `path` expressed relative to `base`; both must be absolute. Paths on
/// different roots come back unchanged.
fn relative_path(path: &Path, base: &Path) -> PathBuf {
    let path_components: Vec<Component> = path.components().collect();
    let base_components: Vec<Component> = base.components().collect();
    let common = path_components
        .iter()
        .zip(&base_components)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return path.to_path_buf();
    }

    let mut relative = PathBuf::new();
    for _ in common..base_components.len() {
        relative.push("..");
    }
    for component in &path_components[common..] {
        relative.push(component.as_os_str());
    }
    relative
}
