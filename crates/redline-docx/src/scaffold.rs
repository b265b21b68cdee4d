//! Minimal new documents.

use std::path::Path;

use crate::error::DocxError;
use crate::package::{DocumentPackage, parts};
use crate::register::{
    add_default, add_override, add_relationship, content_type, relationship_type,
};
use crate::xml::names::{
    CORE_PROPERTIES, DUBLIN_CORE, DUBLIN_CORE_TERMS, EXTENDED_PROPERTIES,
    SCHEMA_INSTANCE, XML_SPACE, XName, content_types, relationships, w,
};
use crate::xml::{self, DocumentTree, NodeId};

const APP_VERSION: &str = "16.0000";

/// What goes into a new document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    /// Body text; each line becomes a paragraph.
    pub text: Option<String>,
    pub title: Option<String>,
    pub creator: String,
    /// Creation timestamp, ISO-8601.
    pub created: String,
}

/// Write a new package to `destination`, creating parent directories.
///
/// # Errors
///
/// Returns [`DocxError::WriteFailure`] if the directory or archive cannot
/// be written.
pub fn create_document(destination: &Path, new: &NewDocument) -> Result<(), DocxError> {
    if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|err| DocxError::write_failure(destination, err))?;
    }
    let package = DocumentPackage::from_parts(destination.to_path_buf(), build_parts(new)?)?;
    package.write_back(destination)?;
    tracing::info!(destination = %destination.display(), "scaffold: document created");
    Ok(())
}

/// Every part of a new package, in archive order.
///
/// # Errors
///
/// Returns [`DocxError::MalformedXml`] if a part fails to serialize.
pub fn build_parts(new: &NewDocument) -> Result<Vec<(String, Vec<u8>)>, DocxError> {
    let trees = [
        (parts::CONTENT_TYPES, content_types_part()),
        (parts::PACKAGE_RELS, package_relationships()),
        (parts::DOCUMENT, document(new.text.as_deref())),
        (parts::DOCUMENT_RELS, document_relationships()),
        (parts::STYLES, styles()),
        (parts::CORE_PROPERTIES, core_properties(new)),
        (parts::APP_PROPERTIES, app_properties()),
    ];
    trees
        .into_iter()
        .map(|(name, tree)| Ok((name.to_string(), xml::serialize(name, &tree)?)))
        .collect()
}

fn content_types_part() -> DocumentTree {
    let mut types = DocumentTree::with_root(content_types::TYPES);
    add_default(&mut types, "rels", content_type::RELATIONSHIPS);
    add_default(&mut types, "xml", content_type::XML);
    for (part, kind) in [
        (parts::DOCUMENT, content_type::DOCUMENT),
        (parts::STYLES, content_type::STYLES),
        (parts::CORE_PROPERTIES, content_type::CORE_PROPERTIES),
        (parts::APP_PROPERTIES, content_type::EXTENDED_PROPERTIES),
    ] {
        add_override(&mut types, &format!("/{part}"), kind);
    }
    types
}

fn package_relationships() -> DocumentTree {
    let mut rels = DocumentTree::with_root(relationships::RELATIONSHIPS);
    add_relationship(&mut rels, relationship_type::OFFICE_DOCUMENT, parts::DOCUMENT);
    add_relationship(&mut rels, relationship_type::CORE_PROPERTIES, parts::CORE_PROPERTIES);
    add_relationship(&mut rels, relationship_type::EXTENDED_PROPERTIES, parts::APP_PROPERTIES);
    rels
}

fn document_relationships() -> DocumentTree {
    let mut rels = DocumentTree::with_root(relationships::RELATIONSHIPS);
    add_relationship(&mut rels, relationship_type::STYLES, "styles.xml");
    rels
}

fn document(text: Option<&str>) -> DocumentTree {
    let mut tree = DocumentTree::with_root(w::DOCUMENT);
    let body = tree.create_element(w::BODY);
    let root = tree.root();
    tree.append_child(root, body);

    for line in text.into_iter().flat_map(str::lines) {
        let paragraph = tree.create_element(w::P);
        if !line.is_empty() {
            let run = tree.create_element(w::R);
            let leaf = tree.create_element(w::T);
            if line.starts_with(char::is_whitespace) || line.ends_with(char::is_whitespace) {
                tree.set_attribute(leaf, XML_SPACE, "preserve");
            }
            let value = tree.create_text(line);
            tree.append_child(leaf, value);
            tree.append_child(run, leaf);
            tree.append_child(paragraph, run);
        }
        tree.append_child(body, paragraph);
    }
    tree
}

fn styles() -> DocumentTree {
    let mut tree = DocumentTree::with_root(w::STYLES);
    let style = tree.create_element(w::STYLE);
    tree.set_attribute(style, w::TYPE, "paragraph");
    tree.set_attribute(style, w::STYLE_ID, "Normal");
    let root = tree.root();
    tree.append_child(root, style);

    let name = child(&mut tree, style, w::NAME);
    tree.set_attribute(name, w::VAL, "Normal");

    let paragraph = child(&mut tree, style, w::PPR);
    let spacing = child(&mut tree, paragraph, w::SPACING);
    tree.set_attribute(spacing, w::AFTER, "0");
    tree.set_attribute(spacing, w::LINE, "240");
    tree.set_attribute(spacing, w::LINE_RULE, "auto");

    let run = child(&mut tree, style, w::RPR);
    let fonts = child(&mut tree, run, w::RFONTS);
    tree.set_attribute(fonts, w::ASCII, "Calibri");
    tree.set_attribute(fonts, w::H_ANSI, "Calibri");
    for size in [w::SZ, w::SZ_CS] {
        let node = child(&mut tree, run, size);
        tree.set_attribute(node, w::VAL, "22");
    }
    tree
}

fn core_properties(new: &NewDocument) -> DocumentTree {
    let mut tree = DocumentTree::with_root(XName::new(CORE_PROPERTIES, "coreProperties"));
    let root = tree.root();
    if let Some(title) = new.title.as_deref().filter(|t| !t.is_empty()) {
        text_child(&mut tree, root, XName::new(DUBLIN_CORE, "title"), title);
    }
    text_child(&mut tree, root, XName::new(DUBLIN_CORE, "creator"), &new.creator);
    for stamp in ["created", "modified"] {
        let node = text_child(
            &mut tree,
            root,
            XName::new(DUBLIN_CORE_TERMS, stamp),
            &new.created,
        );
        tree.set_attribute(node, XName::new(SCHEMA_INSTANCE, "type"), "dcterms:W3CDTF");
    }
    tree
}

fn app_properties() -> DocumentTree {
    let mut tree = DocumentTree::with_root(XName::new(EXTENDED_PROPERTIES, "Properties"));
    let root = tree.root();
    text_child(
        &mut tree,
        root,
        XName::new(EXTENDED_PROPERTIES, "AppVersion"),
        APP_VERSION,
    );
    tree
}

fn child(tree: &mut DocumentTree, parent: NodeId, name: XName) -> NodeId {
    let node = tree.create_element(name);
    tree.append_child(parent, node);
    node
}

fn text_child(tree: &mut DocumentTree, parent: NodeId, name: XName, value: &str) -> NodeId {
    let node = child(tree, parent, name);
    let text = tree.create_text(value);
    tree.append_child(node, text);
    node
}
