use redline_core::enums::ChangeKind;

use crate::comments::max_comment_id;
use crate::error::DocxError;
use crate::package::DocumentPackage;
use crate::register;
use crate::revisions::max_revision_id;
use crate::xml::names::{XML_SPACE, XName, w};
use crate::xml::{DocumentTree, NodeId};

/// Where new content goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Anchor {
    /// Last paragraph of the body.
    #[default]
    End,
    /// 1-based index among the body's paragraphs.
    Paragraph(usize),
}

/// A revision mark to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMark {
    pub kind: ChangeKind,
    pub text: String,
    pub author: String,
    pub date: String,
}

/// A comment to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub author: String,
    pub initials: String,
    pub date: String,
}

/// Append an insertion or deletion wrapper holding one run of `mark.text`
/// to the anchored paragraph. Returns the revision id written on the wrapper.
///
/// # Errors
///
/// - [`DocxError::UnsupportedInsert`] for formatting kinds.
/// - [`DocxError::MissingBody`] if the document has no body.
/// - [`DocxError::AnchorOutOfRange`] if the paragraph index is out of range.
pub fn insert_mark(
    tree: &mut DocumentTree,
    mark: &NewMark,
    anchor: Anchor,
) -> Result<u64, DocxError> {
    let (wrapper, leaf) = match mark.kind {
        ChangeKind::Insertion => (w::INS, w::T),
        ChangeKind::Deletion => (w::DEL, w::DEL_TEXT),
        kind @ (ChangeKind::RunFormatting | ChangeKind::ParagraphFormatting) => {
            return Err(DocxError::UnsupportedInsert(kind));
        }
    };
    let revision_id = next_id(max_revision_id(tree), "revision")?;
    let paragraph = target_paragraph(tree, anchor)?;

    let node = tree.create_element(wrapper);
    tree.set_attribute(node, w::ID, revision_id.to_string());
    tree.set_attribute(node, w::AUTHOR, mark.author.as_str());
    tree.set_attribute(node, w::DATE, mark.date.as_str());
    let run = text_run(tree, leaf, &mark.text);
    tree.append_child(node, run);
    tree.append_child(paragraph, node);

    tracing::debug!(kind = %mark.kind, revision_id, "mutate: inserted mark");
    Ok(revision_id)
}

/// Add a comment definition to `comments` and its anchor triplet to the
/// anchored paragraph of `document`. Returns the new comment id.
///
/// The anchor is resolved before either tree changes, so on error neither
/// tree is touched.
///
/// # Errors
///
/// - [`DocxError::MissingBody`] if the document has no body.
/// - [`DocxError::AnchorOutOfRange`] if the paragraph index is out of range.
pub fn insert_comment(
    document: &mut DocumentTree,
    comments: &mut DocumentTree,
    comment: &NewComment,
    anchor: Anchor,
) -> Result<u64, DocxError> {
    let comment_id = next_id(max_comment_id(comments), "comment")?;
    let paragraph = target_paragraph(document, anchor)?;
    let id = comment_id.to_string();

    let definition = comments.create_element(w::COMMENT);
    comments.set_attribute(definition, w::ID, id.as_str());
    comments.set_attribute(definition, w::AUTHOR, comment.author.as_str());
    comments.set_attribute(definition, w::DATE, comment.date.as_str());
    if !comment.initials.is_empty() {
        comments.set_attribute(definition, w::INITIALS, comment.initials.as_str());
    }
    let body = comments.create_element(w::P);
    let properties = comments.create_element(w::PPR);
    comments.append_child(body, properties);
    let run = text_run(comments, w::T, &comment.text);
    comments.append_child(body, run);
    comments.append_child(definition, body);
    let root = comments.root();
    comments.append_child(root, definition);

    let start = document.create_element(w::COMMENT_RANGE_START);
    document.set_attribute(start, w::ID, id.as_str());
    let reference_run = document.create_element(w::R);
    let reference = document.create_element(w::COMMENT_REFERENCE);
    document.set_attribute(reference, w::ID, id.as_str());
    document.append_child(reference_run, reference);
    let end = document.create_element(w::COMMENT_RANGE_END);
    document.set_attribute(end, w::ID, id.as_str());
    for node in [start, reference_run, end] {
        document.append_child(paragraph, node);
    }

    tracing::debug!(comment_id, "mutate: inserted comment");
    Ok(comment_id)
}

/// Insert a comment into a package, creating and registering the comments
/// part when the package has none.
///
/// # Errors
///
/// Same as [`insert_comment`], plus [`DocxError::MalformedXml`] if the
/// comments, content-types or relationships part cannot be parsed.
pub fn add_comment(
    package: &mut DocumentPackage,
    comment: &NewComment,
    anchor: Anchor,
) -> Result<u64, DocxError> {
    let comment_id = {
        let (document, comments) = package.trees_mut()?;
        insert_comment(document, comments, comment, anchor)?
    };
    if package.comments_created() {
        register::register_comments_part(package)?;
    }
    Ok(comment_id)
}

fn next_id(max: u64, what: &'static str) -> Result<u64, DocxError> {
    max.checked_add(1)
        .ok_or(DocxError::IdSpaceExhausted { what, max })
}

fn target_paragraph(tree: &mut DocumentTree, anchor: Anchor) -> Result<NodeId, DocxError> {
    let body = tree
        .find_first(tree.root(), w::BODY)
        .ok_or(DocxError::MissingBody)?;
    let paragraphs = tree.find_all(body, w::P);
    match anchor {
        Anchor::End => match paragraphs.last() {
            Some(last) => Ok(*last),
            None => Ok(new_paragraph(tree, body)),
        },
        Anchor::Paragraph(index) => index
            .checked_sub(1)
            .and_then(|position| paragraphs.get(position))
            .copied()
            .ok_or(DocxError::AnchorOutOfRange {
                index,
                available: paragraphs.len(),
            }),
    }
}

/// New paragraph at the end of `body`, ahead of a trailing `w:sectPr`.
fn new_paragraph(tree: &mut DocumentTree, body: NodeId) -> NodeId {
    let paragraph = tree.create_element(w::P);
    let section = tree
        .children(body)
        .last()
        .copied()
        .filter(|last| tree.is(*last, w::SECT_PR));
    match section {
        Some(section) => {
            tree.insert_before(section, paragraph);
        }
        None => tree.append_child(body, paragraph),
    }
    paragraph
}

fn text_run(tree: &mut DocumentTree, leaf: XName, text: &str) -> NodeId {
    let run = tree.create_element(w::R);
    let element = tree.create_element(leaf);
    if text.starts_with(char::is_whitespace) || text.ends_with(char::is_whitespace) {
        tree.set_attribute(element, XML_SPACE, "preserve");
    }
    let value = tree.create_text(text);
    tree.append_child(element, value);
    tree.append_child(run, element);
    run
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::revisions::enumerate;
    use crate::xml::names::WORDPROCESSING;
    use crate::xml::{parse, serialize};

    fn tree(body: &str) -> DocumentTree {
        let xml = format!(
            r#"<w:document xmlns:w="{WORDPROCESSING}"><w:body>{body}</w:body></w:document>"#
        );
        parse("word/document.xml", xml.as_bytes()).unwrap()
    }

    fn xml(tree: &DocumentTree) -> String {
        String::from_utf8(serialize("part", tree).unwrap()).unwrap()
    }

    fn mark(kind: ChangeKind, text: &str) -> NewMark {
        NewMark {
            kind,
            text: text.to_string(),
            author: "AIM".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn note(text: &str) -> NewComment {
        NewComment {
            text: text.to_string(),
            author: "Rae Q".to_string(),
            initials: "RQ".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn inserted_mark_lands_in_last_paragraph() {
        let mut doc = tree(
            r#"<w:p><w:r><w:t>one</w:t></w:r></w:p><w:p><w:r><w:t>two</w:t></w:r></w:p>"#,
        );
        let id = insert_mark(&mut doc, &mark(ChangeKind::Insertion, "new"), Anchor::End).unwrap();
        assert_eq!(id, 1);

        let marks = enumerate(&doc);
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[0].author(), "AIM");
        assert_eq!(marks[0].text(), "new");
        let paragraphs = doc.find_all(doc.root(), w::P);
        assert_eq!(doc.ancestor(marks[0].node(), w::P), Some(paragraphs[1]));
    }

    #[test]
    fn inserted_deletion_uses_deleted_text_leaf() {
        let mut doc = tree("<w:p/>");
        insert_mark(&mut doc, &mark(ChangeKind::Deletion, " gone "), Anchor::End).unwrap();
        assert!(xml(&doc).contains(r#"<w:delText xml:space="preserve"> gone </w:delText>"#));
        assert_eq!(enumerate(&doc)[0].text(), " gone ");
    }

    #[test]
    fn revision_ids_continue_from_existing() {
        let mut doc = tree(r#"<w:p><w:ins w:id="41" w:author="A"><w:r><w:t>x</w:t></w:r></w:ins></w:p>"#);
        let id = insert_mark(&mut doc, &mark(ChangeKind::Insertion, "y"), Anchor::End).unwrap();
        assert_eq!(id, 42);
    }

    #[test]
    fn formatting_kinds_are_refused() {
        let mut doc = tree("<w:p/>");
        let err = insert_mark(&mut doc, &mark(ChangeKind::RunFormatting, "x"), Anchor::End)
            .unwrap_err();
        assert!(matches!(err, DocxError::UnsupportedInsert(ChangeKind::RunFormatting)));
    }

    #[test]
    fn paragraph_anchor_is_one_based_and_bounded() {
        let mut doc = tree("<w:p/><w:p/>");
        insert_mark(&mut doc, &mark(ChangeKind::Insertion, "a"), Anchor::Paragraph(1)).unwrap();
        let first = doc.find_all(doc.root(), w::P)[0];
        assert_eq!(doc.text(first, &[w::T]), "a");

        for index in [0, 3] {
            let err = insert_mark(&mut doc, &mark(ChangeKind::Insertion, "b"), Anchor::Paragraph(index))
                .unwrap_err();
            assert!(matches!(err, DocxError::AnchorOutOfRange { available: 2, .. }));
        }
    }

    #[test]
    fn empty_body_gets_paragraph_before_section_properties() {
        let mut doc = tree("<w:sectPr/>");
        insert_mark(&mut doc, &mark(ChangeKind::Insertion, "x"), Anchor::End).unwrap();
        let body = doc.find_first(doc.root(), w::BODY).unwrap();
        let children = doc.children(body);
        assert_eq!(children.len(), 2);
        assert!(doc.is(children[0], w::P));
        assert!(doc.is(children[1], w::SECT_PR));
    }

    #[test]
    fn missing_body_is_reported() {
        let xml = format!(r#"<w:document xmlns:w="{WORDPROCESSING}"/>"#);
        let mut doc = parse("word/document.xml", xml.as_bytes()).unwrap();
        let err = insert_mark(&mut doc, &mark(ChangeKind::Insertion, "x"), Anchor::End).unwrap_err();
        assert!(matches!(err, DocxError::MissingBody));
    }

    #[test]
    fn comment_on_empty_body_creates_one_paragraph_with_triplet() {
        let mut doc = tree("");
        let mut comments = DocumentTree::with_root(w::COMMENTS);
        let id = insert_comment(&mut doc, &mut comments, &note("Check"), Anchor::End).unwrap();
        assert_eq!(id, 1);

        let paragraphs = doc.find_all(doc.root(), w::P);
        assert_eq!(paragraphs.len(), 1);
        let markers: Vec<&str> = doc
            .descendants(paragraphs[0])
            .into_iter()
            .filter_map(|node| doc.element(node))
            .map(|element| element.name.local.as_str())
            .collect();
        assert_eq!(
            markers,
            vec!["commentRangeStart", "r", "commentReference", "commentRangeEnd"]
        );
        assert_eq!(
            xml(&comments),
            format!(
                r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:comments xmlns:w="{WORDPROCESSING}"><w:comment w:id="1" w:author="Rae Q" w:date="2024-01-01T00:00:00Z" w:initials="RQ"><w:p><w:pPr/><w:r><w:t>Check</w:t></w:r></w:p></w:comment></w:comments>"#
            )
        );
    }

    #[test]
    fn comment_id_follows_existing_maximum() {
        let mut doc = tree("<w:p/>");
        let xml = format!(
            r#"<w:comments xmlns:w="{WORDPROCESSING}"><w:comment w:id="2"/><w:comment w:id="7"/></w:comments>"#
        );
        let mut comments = parse("word/comments.xml", xml.as_bytes()).unwrap();
        let id = insert_comment(&mut doc, &mut comments, &note("x"), Anchor::End).unwrap();
        assert_eq!(id, 8);
        assert_eq!(doc.find_all(doc.root(), w::COMMENT_REFERENCE).len(), 1);
    }

    #[test]
    fn out_of_range_comment_touches_nothing() {
        let mut doc = tree("<w:p/>");
        let mut comments = DocumentTree::with_root(w::COMMENTS);
        let before = (xml(&doc), xml(&comments));
        let err = insert_comment(&mut doc, &mut comments, &note("x"), Anchor::Paragraph(5))
            .unwrap_err();
        assert!(matches!(err, DocxError::AnchorOutOfRange { index: 5, available: 1 }));
        assert_eq!((xml(&doc), xml(&comments)), before);
    }

    #[test]
    fn comment_ids_continue_past_u32() {
        for (existing, expected) in [("4294967295", 4_294_967_296), ("5000000000", 5_000_000_001)] {
            let mut doc = tree("<w:p/>");
            let xml = format!(
                r#"<w:comments xmlns:w="{WORDPROCESSING}"><w:comment w:id="7"/><w:comment w:id="{existing}"/></w:comments>"#
            );
            let mut comments = parse("word/comments.xml", xml.as_bytes()).unwrap();
            let id = insert_comment(&mut doc, &mut comments, &note("x"), Anchor::End).unwrap();
            assert_eq!(id, expected);
        }
    }

    #[test]
    fn exhausted_id_space_is_an_error_and_touches_nothing() {
        let mut doc = tree("");
        let xml = format!(
            r#"<w:comments xmlns:w="{WORDPROCESSING}"><w:comment w:id="18446744073709551615"/></w:comments>"#
        );
        let mut comments = parse("word/comments.xml", xml.as_bytes()).unwrap();
        let before = (self::xml(&doc), self::xml(&comments));
        let err = insert_comment(&mut doc, &mut comments, &note("x"), Anchor::End).unwrap_err();
        assert!(matches!(
            err,
            DocxError::IdSpaceExhausted { what: "comment", max: u64::MAX }
        ));
        assert_eq!((self::xml(&doc), self::xml(&comments)), before);

        let mut marked = tree(r#"<w:p><w:ins w:id="99999999999999999999" w:author="A"/></w:p>"#);
        let err = insert_mark(&mut marked, &mark(ChangeKind::Insertion, "y"), Anchor::End)
            .unwrap_err();
        assert!(matches!(err, DocxError::IdSpaceExhausted { what: "revision", .. }));
    }
}
