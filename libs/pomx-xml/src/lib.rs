//! Mutable XML document model for project descriptors.
//!
//! The model keeps everything needed to write a descriptor back out the way a
//! person would: element order, qualified names, attribute order, comments
//! and blank lines between sections. On top of that it offers the handful of
//! operations a descriptor rewrite needs:
//! - a small path vocabulary (`/project/build/plugins`, `*`, `*[jar|war]`),
//! - insertion at the end, at the beginning or before a sibling,
//! - get-or-create of named children,
//! - detaching, moving and importing subtrees.
//!
//! ```rust
//! use pomx_xml::{Document, Position};
//!
//! let mut doc = Document::parse("<project><jar>g:a:1</jar></project>").unwrap();
//! let root = doc.root();
//! let jar = doc.find("/project/jar").unwrap()[0];
//! doc.add_text_element(root, "groupId", "g", Position::Before(jar));
//! doc.remove(jar);
//! assert!(doc.to_xml_string().unwrap().contains("<groupId>g</groupId>"));
//! ```

mod document;
pub mod error;
mod path;
mod reader;
mod writer;

pub use document::{Declaration, Document, Element, NodeId, NodeKind, Origin, Position};
pub use error::{Result, XmlError};
