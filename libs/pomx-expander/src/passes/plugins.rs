//! Build plugin shorthand: `<plugin id="g:a:v">` and shorthand plugin
//! dependencies.

use pomx_xml::{Document, NodeId, Position};

use crate::error::Result;
use crate::passes::{add_coordinate, coordinate_of};
use crate::vocabulary::{DEFAULT_DEPENDENCY_TYPE, DEPENDENCY_TYPES};

const PLUGIN_ID: &str = "id";

pub(crate) fn expand_build_plugins(doc: &mut Document) -> Result<()> {
    let root = doc.root();
    let Some(plugins) = doc.element_at(root, "build/plugins") else {
        return Ok(());
    };
    let shorthand: Vec<NodeId> = doc
        .elements(plugins)
        .filter(|&plugin| doc.local_name(plugin) == Some("plugin"))
        .collect();

    for plugin in shorthand {
        if let Some(id) = doc.remove_attribute(plugin, PLUGIN_ID) {
            expand_plugin_id(doc, plugin, &id)?;
        }
        expand_plugin_dependencies(doc, plugin)?;
    }
    Ok(())
}

fn expand_plugin_id(doc: &mut Document, plugin: NodeId, id: &str) -> Result<()> {
    let coordinate = pomx_repository::Coordinate::parse(id.trim())?;
    if let Some(version) = coordinate.version() {
        doc.add_text_element(plugin, "version", version, Position::Beginning);
    }
    doc.add_text_element(plugin, "artifactId", coordinate.artifact_id(), Position::Beginning);
    doc.add_text_element(plugin, "groupId", coordinate.group_id(), Position::Beginning);
    Ok(())
}

fn expand_plugin_dependencies(doc: &mut Document, plugin: NodeId) -> Result<()> {
    let Some(dependencies) = doc.child(plugin, "dependencies") else {
        return Ok(());
    };
    let entries: Vec<NodeId> = doc
        .elements(dependencies)
        .filter(|&entry| doc.local_name(entry).is_some_and(|name| DEPENDENCY_TYPES.contains(name)))
        .collect();

    for entry in entries {
        let coordinate = coordinate_of(doc, entry)?;
        let kind = doc.local_name(entry).unwrap_or_default().to_string();
        let dependency = doc.add_element(dependencies, "dependency", Position::Before(entry));
        add_coordinate(doc, dependency, &coordinate, Position::End);
        if kind != DEFAULT_DEPENDENCY_TYPE {
            doc.add_text_element(dependency, "type", &kind, Position::End);
        }
        doc.remove(entry);
    }
    Ok(())
}
