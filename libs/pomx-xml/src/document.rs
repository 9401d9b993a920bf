//! Arena-backed XML tree.
//!
//! Nodes live in a single `Vec` owned by the [`Document`] and are addressed by
//! [`NodeId`]. Detaching a node only unlinks it from its parent, so ids stay
//! valid for the lifetime of the document and a detached subtree can be
//! re-attached elsewhere with [`Document::add_node`].

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, XmlError};
use crate::path::PathExpr;
use crate::{reader, writer};

/// Handle to a node of one [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    Comment(String),
    /// Target and data of `<?target data?>`.
    ProcessingInstruction(String),
    /// Content of `<!DOCTYPE ...>`; only found before the root.
    DocType(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Where a new or moved node goes among the children of its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    End,
    Beginning,
    Before(NodeId),
}

/// The `<?xml ...?>` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("UTF-8".to_string()),
            standalone: None,
        }
    }
}

/// Where a document was read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Origin {
    #[default]
    Inline,
    File(PathBuf),
    Uri(String),
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Inline => f.write_str("inline"),
            Origin::File(path) => write!(f, "{}", path.display()),
            Origin::Uri(uri) => f.write_str(uri),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) declaration: Option<Declaration>,
    /// Comments, processing instructions and doctype before the root.
    pub(crate) prolog: Vec<NodeKind>,
    /// Comments and processing instructions after the root.
    pub(crate) epilog: Vec<NodeKind>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) root: NodeId,
    pub(crate) origin: Origin,
}

impl Document {
    /// Create a document holding only an empty root element.
    pub fn new(root_name: &str) -> Self {
        Self {
            declaration: None,
            prolog: Vec::new(),
            epilog: Vec::new(),
            nodes: vec![Node {
                kind: NodeKind::Element(Element::new(root_name)),
                parent: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
            origin: Origin::Inline,
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with_origin(input, Origin::Inline)
    }

    pub fn parse_with_origin(input: &str, origin: Origin) -> Result<Self> {
        reader::parse(input, origin)
    }

    /// Read and parse a file; the path becomes the document's origin.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::trace!(path = %path.display(), "loading XML document");
        let content = fs::read_to_string(path).map_err(|source| XmlError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let content = content.trim_start_matches('\u{feff}');
        Self::parse_with_origin(content, Origin::File(path.to_path_buf()))
    }

    pub fn to_xml_string(&self) -> Result<String> {
        writer::write(self)
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn declaration(&self) -> Option<&Declaration> {
        self.declaration.as_ref()
    }

    pub fn prolog(&self) -> &[NodeKind] {
        &self.prolog
    }

    pub fn epilog(&self) -> &[NodeKind] {
        &self.epilog
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.node(id).kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.node(id).kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::local_name)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Child elements in document order.
    pub fn elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.node(id)
            .children
            .iter()
            .copied()
            .filter(|&child| self.is_element(child))
    }

    /// First child element with the given local name.
    pub fn child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.elements(id)
            .find(|&child| self.local_name(child) == Some(name))
    }

    /// First element reached by following a `/`-separated chain of child
    /// names from `id`.
    pub fn element_at(&self, id: NodeId, path: &str) -> Option<NodeId> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(id, |current, segment| self.child(current, segment))
    }

    /// Descendant elements (excluding `id` itself) with the given local name,
    /// in document order.
    pub fn descendants(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.local_name(current) == Some(name) {
                found.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        found
    }

    /// Evaluate a path expression against the root element.
    ///
    /// Absolute paths (`/project/build`) name the root in their first
    /// segment; relative paths (`dependencies/*`) start below the root.
    pub fn find(&self, expression: &str) -> Result<Vec<NodeId>> {
        let path = PathExpr::parse(expression)?;
        Ok(path.evaluate(self, self.root))
    }

    /// Evaluate a relative path expression below `id`.
    pub fn find_from(&self, id: NodeId, expression: &str) -> Result<Vec<NodeId>> {
        let path = PathExpr::parse(expression)?;
        if path.is_absolute() {
            return Ok(path.evaluate(self, self.root));
        }
        Ok(path.evaluate(self, id))
    }

    /// Concatenated content of the direct text children.
    pub fn text(&self, id: NodeId) -> String {
        self.children(id)
            .iter()
            .filter_map(|&child| match &self.node(child).kind {
                NodeKind::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id)
            .map(|e| e.attributes.as_slice())
            .unwrap_or(&[])
    }

    /// Set an attribute, keeping its position if it already exists.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element(element) = &mut self.node_mut(id).kind {
            match element.attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => element
                    .attributes
                    .push((name.to_string(), value.to_string())),
            }
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let NodeKind::Element(element) = &mut self.node_mut(id).kind else {
            return None;
        };
        let index = element.attributes.iter().position(|(key, _)| key == name)?;
        Some(element.attributes.remove(index).1)
    }

    pub fn add_element(&mut self, parent: NodeId, name: &str, position: Position) -> NodeId {
        let id = self.alloc(NodeKind::Element(Element::new(name)));
        self.attach(parent, id, position);
        id
    }

    /// Add `<name>text</name>`.
    pub fn add_text_element(
        &mut self,
        parent: NodeId,
        name: &str,
        text: &str,
        position: Position,
    ) -> NodeId {
        let id = self.add_element(parent, name, position);
        self.add_text(id, text);
        id
    }

    pub fn add_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.alloc(NodeKind::Text(text.to_string()));
        self.attach(parent, id, Position::End);
        id
    }

    /// Add `<!-- text -->`.
    pub fn add_comment(&mut self, parent: NodeId, text: &str, position: Position) -> NodeId {
        let id = self.alloc(NodeKind::Comment(format!(" {} ", text)));
        self.attach(parent, id, position);
        id
    }

    /// Add whitespace that serializes as one empty line.
    pub fn add_blank_line(&mut self, parent: NodeId, position: Position) -> NodeId {
        let id = self.alloc(NodeKind::Text("\n\n".to_string()));
        self.attach(parent, id, position);
        id
    }

    /// Return the first child element named `name`, creating it at
    /// `position` when there is none.
    pub fn get_or_create_element(
        &mut self,
        parent: NodeId,
        name: &str,
        position: Position,
    ) -> NodeId {
        match self.child(parent, name) {
            Some(existing) => existing,
            None => self.add_element(parent, name, position),
        }
    }

    /// Detach a node (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(parent) = self.node_mut(id).parent.take() {
            self.node_mut(parent).children.retain(|&child| child != id);
        }
    }

    /// Move a node of this document under `parent`.
    pub fn add_node(&mut self, parent: NodeId, id: NodeId, position: Position) {
        self.remove(id);
        self.attach(parent, id, position);
    }

    /// Deep-copy a subtree of `other` into this document. The copy is
    /// detached; attach it with [`Document::add_node`].
    pub fn import(&mut self, other: &Document, id: NodeId) -> NodeId {
        let copy = self.alloc(other.node(id).kind.clone());
        for &child in other.children(id) {
            let child_copy = self.import(other, child);
            self.node_mut(child_copy).parent = Some(copy);
            self.node_mut(copy).children.push(child_copy);
        }
        copy
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn attach(&mut self, parent: NodeId, id: NodeId, position: Position) {
        let siblings = &self.nodes[parent.0].children;
        let index = match position {
            Position::End => siblings.len(),
            Position::Beginning => 0,
            Position::Before(sibling) => {
                let index = siblings.iter().position(|&child| child == sibling);
                debug_assert!(index.is_some(), "insertion anchor is not a child of the parent");
                index.unwrap_or(siblings.len())
            }
        };
        self.node_mut(parent).children.insert(index, id);
        self.node_mut(id).parent = Some(parent);
    }
}

pub(crate) fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}
