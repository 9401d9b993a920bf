//! The rewrite passes, grouped by the part of the descriptor they touch.

pub(crate) mod dependencies;
pub(crate) mod gav;
pub(crate) mod header;
pub(crate) mod plugins;
pub(crate) mod profiles;

use pomx_repository::Coordinate;
use pomx_xml::{Document, NodeId, Position};

use crate::error::Result;

/// Parse the trimmed text content of a shorthand element.
pub(crate) fn coordinate_of(doc: &Document, id: NodeId) -> Result<Coordinate> {
    Ok(Coordinate::parse(doc.text(id).trim())?)
}

/// Add `groupId`, `artifactId` and, when present, `version` and
/// `classifier` at `position`.
///
/// `position` must not be [`Position::Beginning`]; the elements would end up
/// reversed.
pub(crate) fn add_coordinate(
    doc: &mut Document,
    parent: NodeId,
    coordinate: &Coordinate,
    position: Position,
) {
    doc.add_text_element(parent, "groupId", coordinate.group_id(), position);
    doc.add_text_element(parent, "artifactId", coordinate.artifact_id(), position);
    if let Some(version) = coordinate.version() {
        doc.add_text_element(parent, "version", version, position);
    }
    if let Some(classifier) = coordinate.classifier() {
        doc.add_text_element(parent, "classifier", classifier, position);
    }
}
