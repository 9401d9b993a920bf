//! Parsing into the arena tree.
//!
//! `roxmltree` checks well-formedness first; the tree itself is then built
//! from `quick-xml` events, which keep qualified names, attribute order,
//! comments and whitespace exactly as written.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use roxmltree::ParsingOptions;

use crate::document::{Declaration, Document, Element, NodeId, NodeKind, Origin, Position};
use crate::error::{Result, XmlError};

pub(crate) fn parse(input: &str, origin: Origin) -> Result<Document> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    roxmltree::Document::parse_with_options(input, options)?;

    let mut reader = Reader::from_str(input);
    let mut declaration = None;
    let mut doc: Option<Document> = None;
    let mut stack: Vec<NodeId> = Vec::new();
    let mut prolog = Vec::new();
    let mut epilog = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Decl(decl) => {
                let version = decl.version().map_err(quick_xml::Error::from)?;
                let encoding = decl
                    .encoding()
                    .transpose()
                    .map_err(quick_xml::Error::from)?;
                let standalone = decl
                    .standalone()
                    .transpose()
                    .map_err(quick_xml::Error::from)?;
                declaration = Some(Declaration {
                    version: std::str::from_utf8(&version)?.to_string(),
                    encoding: encoding
                        .map(|e| std::str::from_utf8(&e).map(str::to_string))
                        .transpose()?,
                    standalone: standalone
                        .map(|s| std::str::from_utf8(&s).map(str::to_string))
                        .transpose()?,
                });
            }
            Event::Start(start) => {
                let id = open_element(&mut doc, &stack, &start)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                open_element(&mut doc, &stack, &start)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                if let (Some(doc), Some(&parent)) = (doc.as_mut(), stack.last()) {
                    let text = text.unescape().map_err(quick_xml::Error::from)?;
                    append(doc, parent, NodeKind::Text(text.into_owned()));
                }
            }
            Event::CData(data) => {
                if let (Some(doc), Some(&parent)) = (doc.as_mut(), stack.last()) {
                    let text = std::str::from_utf8(&data)?.to_string();
                    append(doc, parent, NodeKind::Text(text));
                }
            }
            Event::Comment(comment) => {
                let text = std::str::from_utf8(&comment)?.to_string();
                let kind = NodeKind::Comment(text);
                place(&mut doc, &stack, &mut prolog, &mut epilog, kind);
            }
            Event::PI(pi) => {
                let text = std::str::from_utf8(&pi)?.to_string();
                let kind = NodeKind::ProcessingInstruction(text);
                place(&mut doc, &stack, &mut prolog, &mut epilog, kind);
            }
            Event::DocType(doctype) => {
                let text = std::str::from_utf8(&doctype)?.trim().to_string();
                prolog.push(NodeKind::DocType(text));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let mut doc = doc.ok_or(XmlError::MissingRoot)?;
    doc.declaration = declaration;
    doc.prolog = prolog;
    doc.epilog = epilog;
    doc.origin = origin;
    Ok(doc)
}

fn open_element(
    doc: &mut Option<Document>,
    stack: &[NodeId],
    start: &BytesStart<'_>,
) -> Result<NodeId> {
    let mut element = Element::new(std::str::from_utf8(start.name().as_ref())?);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(quick_xml::Error::from)?
            .into_owned();
        element.attributes.push((key, value));
    }

    if doc.is_none() {
        let mut created = Document::new(&element.name);
        let root = created.root();
        for (key, value) in &element.attributes {
            created.set_attribute(root, key, value);
        }
        *doc = Some(created);
        return Ok(root);
    }

    let doc = doc.as_mut().ok_or(XmlError::MissingRoot)?;
    match stack.last() {
        Some(&parent) => Ok(append(doc, parent, NodeKind::Element(element))),
        None => Ok(doc.root()),
    }
}

/// Comments and processing instructions outside the root element go to the
/// prolog or epilog.
fn place(
    doc: &mut Option<Document>,
    stack: &[NodeId],
    prolog: &mut Vec<NodeKind>,
    epilog: &mut Vec<NodeKind>,
    kind: NodeKind,
) {
    match (doc.as_mut(), stack.last()) {
        (Some(doc), Some(&parent)) => {
            append(doc, parent, kind);
        }
        (Some(_), None) => epilog.push(kind),
        (None, _) => prolog.push(kind),
    }
}

fn append(doc: &mut Document, parent: NodeId, kind: NodeKind) -> NodeId {
    let id = doc.alloc(kind);
    doc.attach(parent, id, Position::End);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_declaration_attributes_and_comments() {
        let doc = Document::parse(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <project xmlns=\"urn:a\" xmlns:xsi=\"urn:b\" xsi:schemaLocation=\"urn:a x.xsd\">\
             <!-- note --><jar>g:a:1</jar></project>",
        )
        .unwrap();

        let declaration = doc.declaration().unwrap();
        assert_eq!(declaration.version, "1.0");
        assert_eq!(declaration.encoding.as_deref(), Some("UTF-8"));

        let root = doc.root();
        let keys: Vec<_> = doc.attributes(root).iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["xmlns", "xmlns:xsi", "xsi:schemaLocation"]);
        assert_eq!(doc.kind(doc.children(root)[0]), &NodeKind::Comment(" note ".into()));
        assert_eq!(doc.text(doc.child(root, "jar").unwrap()), "g:a:1");
    }

    #[test]
    fn keeps_content_around_the_root() {
        let doc = Document::parse(
            "<?xml version=\"1.0\"?>\n\
             <!-- Licensed under Apache 2.0 -->\n\
             <?xml-stylesheet href=\"pom.xsl\"?>\n\
             <project><?build fast?></project>\n\
             <!-- end -->",
        )
        .unwrap();

        assert_eq!(
            doc.prolog(),
            &[
                NodeKind::Comment(" Licensed under Apache 2.0 ".into()),
                NodeKind::ProcessingInstruction("xml-stylesheet href=\"pom.xsl\"".into()),
            ]
        );
        assert_eq!(doc.epilog(), &[NodeKind::Comment(" end ".into())]);
        let root = doc.root();
        assert_eq!(
            doc.kind(doc.children(root)[0]),
            &NodeKind::ProcessingInstruction("build fast".into())
        );
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let doc = Document::parse(r#"<a b="x &amp; y">1 &lt; 2</a>"#).unwrap();
        assert_eq!(doc.attribute(doc.root(), "b"), Some("x & y"));
        assert_eq!(doc.text(doc.root()), "1 < 2");
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            Document::parse("<project><jar></project>"),
            Err(XmlError::Parse(_))
        ));
        assert!(matches!(Document::parse(""), Err(XmlError::Parse(_))));
    }

    #[test]
    fn empty_root_element() {
        let doc = Document::parse("<project/>").unwrap();
        assert_eq!(doc.name(doc.root()), Some("project"));
        assert!(doc.children(doc.root()).is_empty());
        assert!(doc.declaration().is_none());
    }
}
