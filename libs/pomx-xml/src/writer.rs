//! Serialization with four-space indentation.

use std::io::Write;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{Document, Element, NodeId, NodeKind};
use crate::error::{Result, XmlError};

const INDENT: usize = 4;

pub(crate) fn write(doc: &Document) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);

    let declaration = doc.declaration.clone().unwrap_or_default();
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new(
            &declaration.version,
            declaration.encoding.as_deref(),
            declaration.standalone.as_deref(),
        )),
    )?;
    for kind in &doc.prolog {
        write_misc(&mut writer, kind)?;
    }
    write_element(&mut writer, doc, doc.root())?;
    for kind in &doc.epilog {
        write_misc(&mut writer, kind)?;
    }

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes).map_err(|e| e.utf8_error())?)
}

fn write_element(writer: &mut Writer<Vec<u8>>, doc: &Document, id: NodeId) -> Result<()> {
    let Some(element) = doc.element(id) else {
        return Ok(());
    };

    let children = doc.children(id);
    if children.iter().all(|&child| is_blank(doc, child)) {
        return emit(writer, Event::Empty(start_tag(element)));
    }

    emit(writer, Event::Start(start_tag(element)))?;

    let has_markup = children
        .iter()
        .any(|&child| !matches!(doc.kind(child), NodeKind::Text(_)));
    let has_text = children
        .iter()
        .any(|&child| matches!(doc.kind(child), NodeKind::Text(_)) && !is_blank(doc, child));

    if has_markup && has_text {
        // mixed content: whitespace is significant, so nothing is re-indented
        {
            let mut raw = Writer::new(writer.get_mut());
            for &child in children {
                write_verbatim(&mut raw, doc, child)?;
            }
        }
        // keeps the end tag on the same line
        emit(writer, Event::Text(BytesText::from_escaped("")))?;
    } else if has_markup {
        write_children(writer, doc, children)?;
    } else {
        emit(writer, text_event(&doc.text(id)))?;
    }

    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

/// Element content: whitespace between nodes is re-indented, and a run of
/// whitespace holding a blank line becomes exactly one blank line.
fn write_children(writer: &mut Writer<Vec<u8>>, doc: &Document, children: &[NodeId]) -> Result<()> {
    let mut blank_line = false;
    let mut written = false;

    for &child in children {
        match doc.kind(child) {
            NodeKind::Text(text) if text.trim().is_empty() => {
                if written && text.matches('\n').count() >= 2 {
                    blank_line = true;
                }
            }
            kind => {
                if blank_line {
                    // the writer breaks the line before the next node itself
                    writer.get_mut().push(b'\n');
                    blank_line = false;
                }
                match kind {
                    NodeKind::Element(_) => write_element(writer, doc, child)?,
                    other => write_misc(writer, other)?,
                }
                written = true;
            }
        }
    }
    Ok(())
}

/// A subtree written exactly as stored.
fn write_verbatim<W: Write>(writer: &mut Writer<W>, doc: &Document, id: NodeId) -> Result<()> {
    let NodeKind::Element(element) = doc.kind(id) else {
        return write_misc(writer, doc.kind(id));
    };

    let children = doc.children(id);
    if children.is_empty() {
        return emit(writer, Event::Empty(start_tag(element)));
    }
    emit(writer, Event::Start(start_tag(element)))?;
    for &child in children {
        write_verbatim(writer, doc, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

/// Everything but elements.
fn write_misc<W: Write>(writer: &mut Writer<W>, kind: &NodeKind) -> Result<()> {
    match kind {
        NodeKind::Element(_) => Ok(()),
        NodeKind::Text(text) => emit(writer, text_event(text)),
        NodeKind::Comment(comment) => emit(
            writer,
            Event::Comment(BytesText::from_escaped(comment.as_str())),
        ),
        NodeKind::ProcessingInstruction(content) => {
            emit(writer, Event::PI(BytesPI::new(content.as_str())))
        }
        NodeKind::DocType(content) => emit(
            writer,
            Event::DocType(BytesText::from_escaped(content.as_str())),
        ),
    }
}

fn start_tag(element: &Element) -> BytesStart<'_> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }
    start
}

/// Text with only `<`, `>` and `&` escaped; quotes stay as written.
fn text_event(text: &str) -> Event<'_> {
    Event::Text(BytesText::from_escaped(partial_escape(text)))
}

fn is_blank(doc: &Document, id: NodeId) -> bool {
    matches!(doc.kind(id), NodeKind::Text(text) if text.trim().is_empty())
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| XmlError::Write(quick_xml::Error::from(e).to_string()))
}
