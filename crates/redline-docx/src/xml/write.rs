use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::tree::{DocumentTree, NodeData, NodeId};
use crate::error::DocxError;

/// Serialize a tree with a leading
/// `<?xml version="1.0" encoding="UTF-8" standalone="yes"?>` declaration.
///
/// Prefixes and namespace declarations are written exactly as stored, so
/// `serialize(parse(serialize(parse(x))))` equals `serialize(parse(x))`.
///
/// # Errors
///
/// Returns [`DocxError::MalformedXml`] if the writer rejects an event.
pub fn serialize(part: &str, tree: &DocumentTree) -> Result<Vec<u8>, DocxError> {
    let mut writer = Writer::new(Vec::new());
    emit(
        part,
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )?;
    write_node(part, &mut writer, tree, tree.root())?;
    Ok(writer.into_inner())
}

fn write_node(
    part: &str,
    writer: &mut Writer<Vec<u8>>,
    tree: &DocumentTree,
    id: NodeId,
) -> Result<(), DocxError> {
    match tree.data(id) {
        NodeData::Text(value) => emit(
            part,
            writer,
            Event::Text(BytesText::from_escaped(partial_escape(value.as_str()))),
        ),
        NodeData::Comment(value) => emit(
            part,
            writer,
            Event::Comment(BytesText::from_escaped(value.as_str())),
        ),
        NodeData::Element(element) => {
            let qname = element.name.qualified();
            let mut start = BytesStart::new(qname.as_str());
            for attr in &element.attributes {
                let key = attr.name.qualified();
                start.push_attribute((key.as_str(), attr.value.as_str()));
            }

            let children = tree.children(id);
            if children.is_empty() {
                return emit(part, writer, Event::Empty(start));
            }
            emit(part, writer, Event::Start(start))?;
            for child in children {
                write_node(part, writer, tree, *child)?;
            }
            emit(part, writer, Event::End(BytesEnd::new(qname.as_str())))
        }
    }
}

fn emit(part: &str, writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), DocxError> {
    writer
        .write_event(event)
        .map_err(|err| DocxError::malformed(part, format!("serialization failed: {err}")))
}
