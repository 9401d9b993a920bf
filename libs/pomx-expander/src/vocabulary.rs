//! Fixed element vocabularies of the pomx dialect.
//!
//! Lookups use compile-time perfect hash sets, so classifying an element name
//! never allocates.

use phf::phf_set;

/// Namespace that marks a document as pomx.
pub const POMX_NAMESPACE: &str = "urn:xsd:maven:pomx:5.0.0";
pub const POM_NAMESPACE: &str = "http://maven.apache.org/POM/4.0.0";
pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

pub const MODEL_VERSION: &str = "4.0.0";

pub const WARNING_COMMENT: &str = "WARNING: Do Not Modify This File!";

/// Artifact type under which profile documents are stored.
pub const PROFILE_ARTIFACT_TYPE: &str = "xml";

/// A property every build defines. Activating on it keeps a profile active
/// even when other profiles are activated explicitly.
pub const ALWAYS_SET_PROPERTY: &str = "user.dir";

pub const DEFAULT_DEPENDENCY_TYPE: &str = "jar";

pub const IMPORT_SCOPE: &str = "import";

/// Packaging shorthand elements, in the order used to build queries.
pub const PACKAGINGS: &[&str] = &["war", "jar", "pom"];

/// Shorthand entries inside dependency sections.
pub static DEPENDENCY_TYPES: phf::Set<&'static str> = phf_set! {
    "jar",
    "war",
    "pom",
};

pub static SCOPES: phf::Set<&'static str> = phf_set! {
    "provided",
    "compile",
    "runtime",
    "system",
    "test",
};

/// Root children of a profile document that describe the profile artifact
/// itself and never reach the including project.
pub static PROFILE_NO_COPY: phf::Set<&'static str> = phf_set! {
    "modelVersion",
    "groupId",
    "artifactId",
    "version",
    "packaging",
    "name",
    "description",
};

/// Sections Maven only accepts at project level.
pub static PROJECT_WIDE: phf::Set<&'static str> = phf_set! {
    "licenses",
    "developers",
    "repositories",
    "distributionManagement",
    "scm",
    "profiles",
};

/// Where the content of a profile document's root child ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeTarget {
    /// Dropped.
    Skip,
    /// Appended to the same-named section of the including project.
    Project,
    /// Appended to the same-named section of the generated profile.
    Profile,
}

pub fn merge_target(name: &str) -> MergeTarget {
    if PROFILE_NO_COPY.contains(name) {
        MergeTarget::Skip
    } else if PROJECT_WIDE.contains(name) {
        MergeTarget::Project
    } else {
        MergeTarget::Profile
    }
}
