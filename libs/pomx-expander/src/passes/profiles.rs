//! External profiles: `<profile>g:a:v</profile>` pulls in the profile
//! document stored under that coordinate.
//!
//! The referenced document is expanded on its own first (so profiles may
//! reference further profiles), then merged: project-wide sections go to the
//! including project, everything else into a generated `<profile>` that is
//! always active.

use pomx_repository::Coordinate;
use pomx_xml::{Document, NodeId, Position};

use crate::error::{Error, Result};
use crate::model::ProjectObjectModel;
use crate::passes::coordinate_of;
use crate::pipeline::PassContext;
use crate::vocabulary::{merge_target, MergeTarget, ALWAYS_SET_PROPERTY, PROFILE_ARTIFACT_TYPE};

/// A `profile` without child elements and with non-blank text.
fn is_reference(doc: &Document, profile: NodeId) -> bool {
    doc.elements(profile).next().is_none() && !doc.text(profile).trim().is_empty()
}

pub(crate) fn expand_external_profiles(cx: &mut PassContext<'_>) -> Result<()> {
    let root = cx.doc.root();
    let references: Vec<NodeId> = {
        let doc: &Document = cx.doc;
        doc.descendants(root, "profile")
            .into_iter()
            .filter(|&profile| is_reference(doc, profile))
            .collect()
    };
    if references.is_empty() {
        return Ok(());
    }

    let profiles = cx.doc.get_or_create_element(root, "profiles", Position::End);
    let section = cx.doc.add_blank_line(root, Position::Before(profiles));

    for reference in references {
        let coordinate = coordinate_of(cx.doc, reference)?;
        let version = coordinate.require_version()?.to_string();
        cx.doc.remove(reference);

        let profile = add_profile_skeleton(cx.doc, profiles, &coordinate);
        let resolved = resolve_profile(cx, &coordinate)?;
        merge_profile(cx.doc, &resolved, profile, section);

        let properties = cx.doc.get_or_create_element(profile, "properties", Position::End);
        let property = format!(
            "{}.{}.version",
            coordinate.group_id(),
            coordinate.artifact_id()
        );
        cx.doc
            .add_text_element(properties, &property, &version, Position::Beginning);
    }
    Ok(())
}

fn add_profile_skeleton(doc: &mut Document, profiles: NodeId, coordinate: &Coordinate) -> NodeId {
    let profile = doc.add_element(profiles, "profile", Position::End);
    doc.add_text_element(profile, "id", &coordinate.key(), Position::End);
    let activation = doc.add_element(profile, "activation", Position::End);
    let property = doc.add_element(activation, "property", Position::End);
    doc.add_text_element(property, "name", ALWAYS_SET_PROPERTY, Position::End);
    profile
}

/// Load the profile document and expand it with the same resolver.
fn resolve_profile(cx: &PassContext<'_>, coordinate: &Coordinate) -> Result<Document> {
    if cx.chain.contains(coordinate) {
        let cycle: Vec<String> = cx
            .chain
            .iter()
            .chain(std::iter::once(coordinate))
            .map(Coordinate::to_string)
            .collect();
        return Err(Error::ProfileCycle(cycle.join(" -> ")));
    }

    let path = cx.resolver.resolve(coordinate, PROFILE_ARTIFACT_TYPE)?;
    tracing::debug!(%coordinate, path = %path.display(), "resolved profile");
    let input = Document::load(&path)?;

    let mut chain = cx.chain.to_vec();
    chain.push(coordinate.clone());
    ProjectObjectModel::with_chain(input, cx.resolver, chain).into_expanded()
}

/// Copy the sections of `resolved` into `doc`: project-wide ones to the
/// root (new holders go before `section`), the rest into `profile`.
fn merge_profile(doc: &mut Document, resolved: &Document, profile: NodeId, section: NodeId) {
    let root = doc.root();
    for source in resolved.elements(resolved.root()) {
        let Some(name) = resolved.local_name(source) else {
            continue;
        };
        let target = match merge_target(name) {
            MergeTarget::Skip => continue,
            MergeTarget::Project => doc.get_or_create_element(root, name, Position::Before(section)),
            MergeTarget::Profile => doc.get_or_create_element(profile, name, Position::End),
        };

        let mut children = resolved.elements(source).peekable();
        if children.peek().is_none() {
            let text = resolved.text(source);
            if !text.trim().is_empty() {
                doc.add_text(target, text.trim());
            }
        }
        for child in children {
            let copy = doc.import(resolved, child);
            doc.add_node(target, copy, Position::End);
        }
    }
}
