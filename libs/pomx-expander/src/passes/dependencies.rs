//! Dependency shorthand: scope holders under `dependencies` and BOM imports
//! under `dependencyManagement`.

use pomx_xml::{Document, NodeId, NodeKind, Position};

use crate::error::Result;
use crate::passes::{add_coordinate, coordinate_of};
use crate::vocabulary::{DEFAULT_DEPENDENCY_TYPE, DEPENDENCY_TYPES, IMPORT_SCOPE, SCOPES};

fn shorthand_entries(doc: &Document, holder: NodeId) -> Vec<NodeId> {
    doc.elements(holder)
        .filter(|&entry| is_shorthand(doc, entry))
        .collect()
}

/// `<dependencyManagement><pom>g:a:v</pom></dependencyManagement>` becomes an
/// imported dependency.
pub(crate) fn expand_dependency_management(doc: &mut Document) -> Result<()> {
    let root = doc.root();
    let Some(management) = doc.child(root, "dependencyManagement") else {
        return Ok(());
    };
    let entries = shorthand_entries(doc, management);
    if entries.is_empty() {
        return Ok(());
    }

    let dependencies = doc.get_or_create_element(management, "dependencies", Position::End);
    for entry in entries {
        let coordinate = coordinate_of(doc, entry)?;
        let kind = doc.local_name(entry).unwrap_or_default().to_string();
        let dependency = doc.add_element(dependencies, "dependency", Position::End);
        add_coordinate(doc, dependency, &coordinate, Position::End);
        doc.add_text_element(dependency, "scope", IMPORT_SCOPE, Position::End);
        doc.add_text_element(dependency, "type", &kind, Position::End);
        doc.remove(entry);
    }
    Ok(())
}

/// `<dependencies><test><jar>g:a:v</jar></test></dependencies>` becomes a
/// dependency with `scope=test`, placed where the holder was.
///
/// Anything else inside a holder (full `dependency` elements, comments) moves
/// out with it, in order.
pub(crate) fn expand_dependencies(doc: &mut Document) -> Result<()> {
    let holders: Vec<NodeId> = doc
        .find("dependencies/*")?
        .into_iter()
        .filter(|&holder| doc.local_name(holder).is_some_and(|name| SCOPES.contains(name)))
        .collect();

    for holder in holders {
        let Some(dependencies) = doc.parent(holder) else {
            continue;
        };
        let scope = doc.local_name(holder).unwrap_or_default().to_string();
        let here = Position::Before(holder);
        for child in doc.children(holder).to_vec() {
            match doc.kind(child) {
                NodeKind::Text(text) if text.trim().is_empty() => {}
                NodeKind::Element(_) if is_shorthand(doc, child) => {
                    let coordinate = coordinate_of(doc, child)?;
                    let kind = doc.local_name(child).unwrap_or_default().to_string();
                    let dependency = doc.add_element(dependencies, "dependency", here);
                    add_coordinate(doc, dependency, &coordinate, Position::End);
                    if kind != DEFAULT_DEPENDENCY_TYPE {
                        doc.add_text_element(dependency, "type", &kind, Position::End);
                    }
                    doc.add_text_element(dependency, "scope", &scope, Position::End);
                }
                _ => {
                    if doc.is_element(child) && doc.local_name(child) != Some("dependency") {
                        tracing::warn!(
                            scope = %scope,
                            element = doc.name(child).unwrap_or_default(),
                            "unexpected element in dependency scope, moved out as is"
                        );
                    }
                    doc.add_node(dependencies, child, here);
                }
            }
        }
        doc.remove(holder);
    }
    Ok(())
}

fn is_shorthand(doc: &Document, id: NodeId) -> bool {
    doc.local_name(id)
        .is_some_and(|name| DEPENDENCY_TYPES.contains(name))
}
