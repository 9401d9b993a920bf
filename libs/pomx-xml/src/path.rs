//! The small path vocabulary used to query documents.
//!
//! ```text
//! /project/build/plugins     absolute, literal names
//! dependencies/*             relative to the root, any child element
//! /project/*[war|jar|pom]    any child whose local name is in the set
//! ```

use crate::document::{Document, NodeId};
use crate::error::{Result, XmlError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Step {
    Name(String),
    Any,
    OneOf(Vec<String>),
}

impl Step {
    fn matches(&self, local_name: &str) -> bool {
        match self {
            Step::Name(name) => name == local_name,
            Step::Any => true,
            Step::OneOf(names) => names.iter().any(|name| name == local_name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PathExpr {
    absolute: bool,
    steps: Vec<Step>,
}

impl PathExpr {
    pub(crate) fn parse(expression: &str) -> Result<Self> {
        let invalid = |reason: &str| XmlError::InvalidPath {
            expression: expression.to_string(),
            reason: reason.to_string(),
        };

        let absolute = expression.starts_with('/');
        let body = expression.strip_prefix('/').unwrap_or(expression);
        if body.is_empty() {
            return Err(invalid("empty path"));
        }

        let steps = body
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    return Err(invalid("empty segment"));
                }
                if segment == "*" {
                    return Ok(Step::Any);
                }
                if let Some(set) = segment.strip_prefix("*[") {
                    let set = set
                        .strip_suffix(']')
                        .ok_or_else(|| invalid("unterminated name set"))?;
                    let names: Vec<String> = set
                        .split('|')
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                        .map(str::to_string)
                        .collect();
                    if names.is_empty() {
                        return Err(invalid("empty name set"));
                    }
                    return Ok(Step::OneOf(names));
                }
                if segment.contains(['*', '[', ']']) {
                    return Err(invalid("unsupported segment"));
                }
                Ok(Step::Name(segment.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { absolute, steps })
    }

    pub(crate) fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Absolute paths match their first step against `context` itself;
    /// relative paths start with the children of `context`.
    pub(crate) fn evaluate(&self, doc: &Document, context: NodeId) -> Vec<NodeId> {
        let (mut current, steps) = if self.absolute {
            let Some((first, rest)) = self.steps.split_first() else {
                return Vec::new();
            };
            let root_matches = doc
                .local_name(context)
                .is_some_and(|name| first.matches(name));
            if !root_matches {
                return Vec::new();
            }
            (vec![context], rest)
        } else {
            (vec![context], self.steps.as_slice())
        };

        for step in steps {
            current = current
                .into_iter()
                .flat_map(|node| {
                    doc.elements(node)
                        .filter(|&child| doc.local_name(child).is_some_and(|name| step.matches(name)))
                        .collect::<Vec<_>>()
                })
                .collect();
        }
        current
    }
}
