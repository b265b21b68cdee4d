//! Content-type and relationship bookkeeping for package parts.

use crate::error::DocxError;
use crate::package::{DocumentPackage, parts};
use crate::xml::names::{content_types, relationships};
use crate::xml::{self, DocumentTree};

/// Content types of the parts this crate reads or writes.
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const STYLES: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
    pub const COMMENTS: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.comments+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

/// Relationship type URIs.
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
    pub const COMMENTS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/comments";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
}

/// Add a `Default` entry for `extension` unless one exists.
pub fn add_default(types: &mut DocumentTree, extension: &str, content_type: &str) -> bool {
    let exists = types
        .child_elements(types.root(), content_types::DEFAULT)
        .into_iter()
        .any(|node| {
            types
                .attribute(node, content_types::EXTENSION)
                .is_some_and(|value| value.eq_ignore_ascii_case(extension))
        });
    if exists {
        return false;
    }
    let node = types.create_element(content_types::DEFAULT);
    types.set_attribute(node, content_types::EXTENSION, extension);
    types.set_attribute(node, content_types::CONTENT_TYPE, content_type);
    let root = types.root();
    types.append_child(root, node);
    true
}

/// Add an `Override` for `part_name` (with leading `/`) unless one exists.
pub fn add_override(types: &mut DocumentTree, part_name: &str, content_type: &str) -> bool {
    let exists = types
        .child_elements(types.root(), content_types::OVERRIDE)
        .into_iter()
        .any(|node| types.attribute(node, content_types::PART_NAME) == Some(part_name));
    if exists {
        return false;
    }
    let node = types.create_element(content_types::OVERRIDE);
    types.set_attribute(node, content_types::PART_NAME, part_name);
    types.set_attribute(node, content_types::CONTENT_TYPE, content_type);
    let root = types.root();
    types.append_child(root, node);
    true
}

/// Id of the relationship of `rel_type` pointing at `target`, adding one
/// with the next free `rIdN` when absent.
pub fn add_relationship(rels: &mut DocumentTree, rel_type: &str, target: &str) -> String {
    let existing = rels.child_elements(rels.root(), relationships::RELATIONSHIP);
    if let Some(id) = existing
        .iter()
        .filter(|node| {
            rels.attribute(**node, relationships::TYPE) == Some(rel_type)
                && rels.attribute(**node, relationships::TARGET) == Some(target)
        })
        .find_map(|node| rels.attribute(*node, relationships::ID))
    {
        return id.to_string();
    }

    let next = existing
        .iter()
        .filter_map(|node| rels.attribute(*node, relationships::ID))
        .filter_map(|id| id.strip_prefix("rId"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0)
        + 1;
    let id = format!("rId{next}");

    let node = rels.create_element(relationships::RELATIONSHIP);
    rels.set_attribute(node, relationships::ID, id.as_str());
    rels.set_attribute(node, relationships::TYPE, rel_type);
    rels.set_attribute(node, relationships::TARGET, target);
    let root = rels.root();
    rels.append_child(root, node);
    id
}

/// Declare a newly created comments part in the content types and in the
/// document's relationships. A package without either part is left as is
/// for that part.
///
/// # Errors
///
/// Returns [`DocxError::MalformedXml`] if either part cannot be parsed.
pub fn register_comments_part(package: &mut DocumentPackage) -> Result<(), DocxError> {
    if package.has_part(parts::CONTENT_TYPES) {
        let mut types = xml::parse(parts::CONTENT_TYPES, package.read_part(parts::CONTENT_TYPES)?)?;
        if add_override(
            &mut types,
            &format!("/{}", parts::COMMENTS),
            content_type::COMMENTS,
        ) {
            let bytes = xml::serialize(parts::CONTENT_TYPES, &types)?;
            package.set_part(parts::CONTENT_TYPES, bytes);
        }
    } else {
        tracing::warn!("register: package has no content types part; comments part not declared");
    }

    if package.has_part(parts::DOCUMENT_RELS) {
        let mut rels = xml::parse(parts::DOCUMENT_RELS, package.read_part(parts::DOCUMENT_RELS)?)?;
        let before = rels.children(rels.root()).len();
        let id = add_relationship(&mut rels, relationship_type::COMMENTS, "comments.xml");
        if rels.children(rels.root()).len() != before {
            let bytes = xml::serialize(parts::DOCUMENT_RELS, &rels)?;
            package.set_part(parts::DOCUMENT_RELS, bytes);
        }
        tracing::info!(relationship = %id, "register: comments part registered");
    } else {
        tracing::warn!("register: package has no document relationships part; comments part not linked");
    }
    Ok(())
}
