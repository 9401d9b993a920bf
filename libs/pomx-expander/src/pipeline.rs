//! The ordered list of rewrite passes applied to a descriptor.
//!
//! Each pass is a plain function over a [`PassContext`]; [`PIPELINE`] fixes
//! the order in which [`crate::ProjectObjectModel`] applies them. A single
//! pass can be applied on its own, which is how the passes are tested.

use pomx_repository::{Coordinate, Resolver};
use pomx_xml::Document;

use crate::error::Result;
use crate::passes::{dependencies, gav, header, plugins, profiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    ConvertNamespace,
    ModelVersion,
    GeneratedWarning,
    ExpandGav,
    ExpandBuildPlugins,
    ExpandDependencyManagement,
    ExpandDependencies,
    ExpandExternalProfiles,
}

pub const PIPELINE: [Pass; 8] = [
    Pass::ConvertNamespace,
    Pass::ModelVersion,
    Pass::GeneratedWarning,
    Pass::ExpandGav,
    Pass::ExpandBuildPlugins,
    Pass::ExpandDependencyManagement,
    Pass::ExpandDependencies,
    Pass::ExpandExternalProfiles,
];

impl Pass {
    pub fn name(self) -> &'static str {
        match self {
            Pass::ConvertNamespace => "convert-namespace",
            Pass::ModelVersion => "model-version",
            Pass::GeneratedWarning => "generated-warning",
            Pass::ExpandGav => "expand-gav",
            Pass::ExpandBuildPlugins => "expand-build-plugins",
            Pass::ExpandDependencyManagement => "expand-dependency-management",
            Pass::ExpandDependencies => "expand-dependencies",
            Pass::ExpandExternalProfiles => "expand-external-profiles",
        }
    }

    pub fn apply(self, cx: &mut PassContext<'_>) -> Result<()> {
        tracing::debug!(pass = self.name(), "applying pass");
        match self {
            Pass::ConvertNamespace => {
                header::convert_namespace(cx.doc);
                Ok(())
            }
            Pass::ModelVersion => {
                header::add_model_version(cx.doc);
                Ok(())
            }
            Pass::GeneratedWarning => {
                header::add_generated_warning(cx.doc);
                Ok(())
            }
            Pass::ExpandGav => gav::expand_gav(cx.doc),
            Pass::ExpandBuildPlugins => plugins::expand_build_plugins(cx.doc),
            Pass::ExpandDependencyManagement => dependencies::expand_dependency_management(cx.doc),
            Pass::ExpandDependencies => dependencies::expand_dependencies(cx.doc),
            Pass::ExpandExternalProfiles => profiles::expand_external_profiles(cx),
        }
    }
}

/// The document being rewritten plus what the profile pass needs to load
/// and expand referenced profiles.
pub struct PassContext<'a> {
    pub(crate) doc: &'a mut Document,
    pub(crate) resolver: &'a dyn Resolver,
    /// Profiles currently being expanded, outermost first.
    pub(crate) chain: &'a [Coordinate],
}

impl<'a> PassContext<'a> {
    pub fn new(doc: &'a mut Document, resolver: &'a dyn Resolver) -> Self {
        Self {
            doc,
            resolver,
            chain: &[],
        }
    }

    pub(crate) fn nested(
        doc: &'a mut Document,
        resolver: &'a dyn Resolver,
        chain: &'a [Coordinate],
    ) -> Self {
        Self {
            doc,
            resolver,
            chain,
        }
    }
}

/// Apply every pass of [`PIPELINE`] in order.
pub(crate) fn run(cx: &mut PassContext<'_>) -> Result<()> {
    for pass in PIPELINE {
        pass.apply(cx)?;
    }
    Ok(())
}
