use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

use super::tree::{Attribute, DocumentTree, Element, Name, NodeData, NodeId};
use crate::error::DocxError;

/// Parse one XML part into a [`DocumentTree`].
///
/// `part` names the part in error messages. The XML declaration, processing
/// instructions, and doctype are dropped; the writer emits a fixed
/// declaration instead.
///
/// # Errors
///
/// Returns [`DocxError::MalformedXml`] on invalid UTF-8, syntax errors,
/// mismatched or unclosed tags, undeclared prefixes, or a missing root.
pub fn parse(part: &str, bytes: &[u8]) -> Result<DocumentTree, DocxError> {
    let text = std::str::from_utf8(bytes).map_err(|err| DocxError::malformed(part, err))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = NsReader::from_str(text);
    let mut tree: Option<DocumentTree> = None;
    let mut stack: Vec<NodeId> = Vec::new();

    loop {
        let (resolved, event) = match reader.read_resolved_event() {
            Ok(pair) => pair,
            Err(err) => return Err(DocxError::malformed(part, err)),
        };
        match event {
            Event::Start(start) => {
                let namespace = owned_namespace(part, resolved)?;
                let element = build_element(part, &reader, namespace, &start)?;
                let id = open_element(part, &mut tree, &stack, element)?;
                stack.push(id);
            }
            Event::Empty(start) => {
                let namespace = owned_namespace(part, resolved)?;
                let element = build_element(part, &reader, namespace, &start)?;
                open_element(part, &mut tree, &stack, element)?;
            }
            Event::End(_) => {
                stack.pop();
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| DocxError::malformed(part, err))?;
                push_leaf(&mut tree, &stack, NodeData::Text(value.into_owned()));
            }
            Event::CData(data) => {
                let value = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|err| DocxError::malformed(part, err))?;
                push_leaf(&mut tree, &stack, NodeData::Text(value));
            }
            Event::Comment(comment) => {
                let value = String::from_utf8_lossy(&comment.into_inner()).into_owned();
                if !stack.is_empty() {
                    push_leaf(&mut tree, &stack, NodeData::Comment(value));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !stack.is_empty() {
        return Err(DocxError::malformed(part, "unexpected end of input inside an element"));
    }
    tree.ok_or_else(|| DocxError::malformed(part, "no root element"))
}

fn open_element(
    part: &str,
    tree: &mut Option<DocumentTree>,
    stack: &[NodeId],
    element: Element,
) -> Result<NodeId, DocxError> {
    match (tree.as_mut(), stack.last()) {
        (Some(tree), Some(parent)) => {
            let id = tree.alloc(NodeData::Element(element));
            tree.append_child(*parent, id);
            Ok(id)
        }
        (Some(_), None) => Err(DocxError::malformed(part, "more than one root element")),
        (None, _) => {
            let created = DocumentTree::from_root_element(element);
            let root = created.root();
            *tree = Some(created);
            Ok(root)
        }
    }
}

/// Attach text or a comment to the open element; content outside the root
/// (whitespace between prolog and root) is dropped.
fn push_leaf(tree: &mut Option<DocumentTree>, stack: &[NodeId], data: NodeData) {
    if matches!(&data, NodeData::Text(value) if value.is_empty()) {
        return;
    }
    if let (Some(tree), Some(parent)) = (tree.as_mut(), stack.last()) {
        let id = tree.alloc(data);
        tree.append_child(*parent, id);
    }
}

fn build_element(
    part: &str,
    reader: &NsReader<&[u8]>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<Element, DocxError> {
    let qname = start.name();
    let name = Name {
        namespace,
        prefix: qname
            .prefix()
            .map(|prefix| utf8(part, prefix.as_ref()))
            .transpose()?,
        local: utf8(part, start.local_name().as_ref())?,
    };

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|err| DocxError::malformed(part, err))?;
        let raw_key = utf8(part, attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|err| DocxError::malformed(part, err))?
            .into_owned();

        let name = if raw_key == "xmlns" {
            Name {
                namespace: None,
                prefix: None,
                local: raw_key,
            }
        } else if let Some(declared) = raw_key.strip_prefix("xmlns:") {
            Name {
                namespace: None,
                prefix: Some(String::from("xmlns")),
                local: declared.to_string(),
            }
        } else {
            let (resolved, local) = reader.resolve_attribute(attr.key);
            Name {
                namespace: owned_namespace(part, resolved)?,
                prefix: attr
                    .key
                    .prefix()
                    .map(|prefix| utf8(part, prefix.as_ref()))
                    .transpose()?,
                local: utf8(part, local.as_ref())?,
            }
        };
        attributes.push(Attribute { name, value });
    }

    Ok(Element { name, attributes })
}

fn owned_namespace(part: &str, resolved: ResolveResult<'_>) -> Result<Option<String>, DocxError> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(Some(utf8(part, namespace.as_ref())?)),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(DocxError::malformed(
            part,
            format!(
                "undeclared namespace prefix '{}'",
                String::from_utf8_lossy(&prefix)
            ),
        )),
    }
}

fn utf8(part: &str, bytes: &[u8]) -> Result<String, DocxError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|err| DocxError::malformed(part, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::names::{WORDPROCESSING, XML, XName, w};

    #[test]
    fn resolves_namespaces_independent_of_prefix() {
        let xml = format!(
            r#"<?xml version="1.0"?><x:document xmlns:x="{WORDPROCESSING}"><x:body><x:p/></x:body></x:document>"#
        );
        let tree = parse("word/document.xml", xml.as_bytes()).unwrap();
        assert!(tree.is(tree.root(), w::DOCUMENT));
        assert_eq!(tree.find_all(tree.root(), w::P).len(), 1);
    }

    #[test]
    fn default_namespace_applies_to_elements_not_attributes() {
        let xml = r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Override PartName="/word/document.xml"/></Types>"#;
        let tree = parse("[Content_Types].xml", xml.as_bytes()).unwrap();
        let node = tree
            .find_first(tree.root(), crate::xml::names::content_types::OVERRIDE)
            .unwrap();
        assert_eq!(
            tree.attribute(node, XName::unqualified("PartName")),
            Some("/word/document.xml")
        );
    }

    #[test]
    fn unescapes_text_and_attributes() {
        let xml = format!(
            r#"<w:t xmlns:w="{WORDPROCESSING}" w:val="a&amp;b">x &lt; y &#233;</w:t>"#
        );
        let tree = parse("p", xml.as_bytes()).unwrap();
        assert_eq!(tree.attribute(tree.root(), w::VAL), Some("a&b"));
        assert_eq!(tree.text(tree.root(), &[w::T]), "x < y é");
    }

    #[test]
    fn xml_prefix_is_builtin() {
        let xml = format!(r#"<w:t xmlns:w="{WORDPROCESSING}" xml:space="preserve"> a </w:t>"#);
        let tree = parse("p", xml.as_bytes()).unwrap();
        assert_eq!(
            tree.attribute(tree.root(), XName::new(XML, "space")),
            Some("preserve")
        );
        assert_eq!(tree.text(tree.root(), &[w::T]), " a ");
    }

    #[test]
    fn rejects_mismatched_tags() {
        let err = parse("word/document.xml", b"<a><b></a>").unwrap_err();
        assert!(matches!(err, DocxError::MalformedXml { ref part, .. } if part == "word/document.xml"));
    }

    #[test]
    fn rejects_unclosed_root() {
        assert!(parse("p", b"<a><b/>").is_err());
    }

    #[test]
    fn rejects_undeclared_prefix() {
        assert!(parse("p", b"<w:document/>").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse("p", b"   ").unwrap_err();
        assert!(err.to_string().contains("no root element"));
    }

    #[test]
    fn accepts_byte_order_mark() {
        let mut bytes = "\u{feff}".as_bytes().to_vec();
        bytes.extend_from_slice(b"<root/>");
        assert!(parse("p", &bytes).is_ok());
    }
}
