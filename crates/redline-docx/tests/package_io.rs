//! Container accessor behavior against real archives on disk.

mod common;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use common::{IMAGE, document_xml, entry_names, read_entry, write_docx, write_zip};
use redline_docx::{DocumentPackage, DocxError, mutate, revisions};
use redline_docx::xml::names::w;

const BODY: &str = r#"<w:p><w:r><w:t>Plain</w:t></w:r></w:p>"#;

// ---------------------------------------------------------------------------
// Open failures
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = DocumentPackage::open(&dir.path().join("nope.docx")).unwrap_err();
    assert!(matches!(err, DocxError::NotFound { .. }));
}

#[test]
fn other_extensions_are_refused_before_reading() {
    let dir = TempDir::new().unwrap();
    let valid = write_docx(dir.path(), "doc.docx", BODY, None);
    for name in ["doc.txt", "doc.zip", "doc"] {
        let path = dir.path().join(name);
        std::fs::copy(&valid, &path).unwrap();
        let err = DocumentPackage::open(&path).unwrap_err();
        assert!(matches!(err, DocxError::NotADocx { .. }), "{name}");
        assert!(err.to_string().starts_with("File must be a .docx file"));
    }
}

#[test]
fn extension_check_ignores_case() {
    let dir = TempDir::new().unwrap();
    let valid = write_docx(dir.path(), "doc.docx", BODY, None);
    let upper = dir.path().join("REPORT.DOCX");
    std::fs::copy(&valid, &upper).unwrap();
    assert!(DocumentPackage::open(&upper).is_ok());
}

#[test]
fn non_zip_is_invalid_format() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.docx");
    std::fs::write(&path, b"just some text").unwrap();
    let err = DocumentPackage::open(&path).unwrap_err();
    assert!(matches!(err, DocxError::InvalidFormat { .. }));
}

#[test]
fn archive_without_document_part_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(dir.path(), "empty.docx", &[("hello.txt", b"hi")]);
    let err = DocumentPackage::open(&path).unwrap_err();
    assert!(matches!(err, DocxError::MissingPart { ref part } if part == "word/document.xml"));
    assert!(err.is_malformed_document());
}

#[test]
fn unparsable_document_part_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_zip(dir.path(), "bad.docx", &[("word/document.xml", b"<w:document>")]);
    let err = DocumentPackage::open(&path).unwrap_err();
    assert!(matches!(err, DocxError::MalformedXml { .. }));
    assert!(err.is_malformed_document());
}

#[test]
fn read_part_reports_missing_part() {
    let dir = TempDir::new().unwrap();
    let path = write_docx(dir.path(), "doc.docx", BODY, None);
    let mut package = DocumentPackage::open(&path).unwrap();
    assert_eq!(package.read_part("word/media/image1.png").unwrap(), IMAGE);
    assert!(matches!(
        package.read_part("word/footer1.xml").unwrap_err(),
        DocxError::MissingPart { .. }
    ));
    assert!(package.trees().unwrap().1.is_none());
}

#[test]
fn damaged_comments_part_only_blocks_comment_access() {
    let dir = TempDir::new().unwrap();
    let document = document_xml(
        r#"<w:p><w:ins w:id="1" w:author="Ann"><w:r><w:t>kept</w:t></w:r></w:ins></w:p>"#,
    );
    let broken: &[u8] = b"<w:comments><w:comment";
    let path = write_zip(
        dir.path(),
        "half.docx",
        &[
            ("word/document.xml", document.as_bytes()),
            ("word/comments.xml", broken),
        ],
    );

    let mut package = DocumentPackage::open(&path).unwrap();
    let marks = revisions::enumerate(package.document());
    assert_eq!(marks.len(), 1);
    mutate::apply(package.document_mut(), &marks[0]).unwrap();

    let err = package.trees().unwrap_err();
    assert!(matches!(err, DocxError::MalformedXml { ref part, .. } if part == "word/comments.xml"));
    assert!(matches!(
        package.trees_mut().unwrap_err(),
        DocxError::MalformedXml { .. }
    ));

    package.write_back(&path).unwrap();
    assert_eq!(read_entry(&path, "word/comments.xml").unwrap(), broken);
    let reopened = DocumentPackage::open(&path).unwrap();
    assert!(revisions::enumerate(reopened.document()).is_empty());
}

// ---------------------------------------------------------------------------
// Write-back
// ---------------------------------------------------------------------------

#[test]
fn write_back_keeps_untouched_parts_and_order() {
    let dir = TempDir::new().unwrap();
    let source = write_docx(dir.path(), "doc.docx", BODY, None);
    let original_rels = read_entry(&source, "word/_rels/document.xml.rels").unwrap();

    let mut package = DocumentPackage::open(&source).unwrap();
    let tree = package.document_mut();
    let paragraph = tree.find_first(tree.root(), w::P).unwrap();
    tree.remove(paragraph);

    let out = dir.path().join("out.docx");
    package.write_back(&out).unwrap();

    assert_eq!(entry_names(&out), entry_names(&source));
    assert_eq!(read_entry(&out, "word/media/image1.png").unwrap(), IMAGE);
    assert_eq!(
        read_entry(&out, "word/_rels/document.xml.rels").unwrap(),
        original_rels
    );
    let reopened = DocumentPackage::open(&out).unwrap();
    assert!(reopened.document().find_first(reopened.document().root(), w::P).is_none());
}

#[test]
fn write_back_in_place_replaces_source() {
    let dir = TempDir::new().unwrap();
    let source = write_docx(dir.path(), "doc.docx", BODY, None);

    let mut package = DocumentPackage::open(&source).unwrap();
    let tree = package.document_mut();
    let leaf = tree.find_first(tree.root(), w::T).unwrap();
    let text = tree.create_text(" edited");
    tree.append_child(leaf, text);
    package.write_back(&source).unwrap();

    let reopened = DocumentPackage::open(&source).unwrap();
    let tree = reopened.document();
    assert_eq!(tree.text(tree.root(), &[w::T]), "Plain edited");

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(leftovers.len(), 1);
}

#[cfg(unix)]
#[test]
fn write_back_carries_source_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    let source = write_docx(dir.path(), "doc.docx", BODY, None);
    std::fs::set_permissions(&source, std::fs::Permissions::from_mode(0o640)).unwrap();

    let out = dir.path().join("out.docx");
    DocumentPackage::open(&source).unwrap().write_back(&out).unwrap();

    let mode = std::fs::metadata(&out).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o640);
}

#[test]
fn failed_write_back_leaves_source_untouched() {
    let dir = TempDir::new().unwrap();
    let source = write_docx(dir.path(), "doc.docx", BODY, None);
    let before = std::fs::read(&source).unwrap();

    let mut package = DocumentPackage::open(&source).unwrap();
    let tree = package.document_mut();
    let paragraph = tree.find_first(tree.root(), w::P).unwrap();
    tree.remove(paragraph);

    let destination = dir.path().join("missing-dir").join("out.docx");
    let err = package.write_back(&destination).unwrap_err();
    assert!(matches!(err, DocxError::WriteFailure { .. }));
    assert!(!destination.exists());
    assert_eq!(std::fs::read(&source).unwrap(), before);
}

#[test]
fn unmodified_package_writes_identical_parts() {
    let dir = TempDir::new().unwrap();
    let source = write_docx(dir.path(), "doc.docx", BODY, None);
    let package = DocumentPackage::open(&source).unwrap();
    let out = dir.path().join("copy.docx");
    package.write_back(&out).unwrap();

    for name in entry_names(&source) {
        assert_eq!(read_entry(&out, &name), read_entry(&source, &name), "{name}");
    }
}

#[test]
fn serialization_is_stable_after_first_write() {
    let dir = TempDir::new().unwrap();
    let source = write_docx(
        dir.path(),
        "doc.docx",
        r#"<w:p><w:r><w:t xml:space="preserve"> a &amp; b </w:t></w:r></w:p>"#,
        None,
    );

    let mut package = DocumentPackage::open(&source).unwrap();
    package.document_mut();
    let first = dir.path().join("first.docx");
    package.write_back(&first).unwrap();

    let mut package = DocumentPackage::open(&first).unwrap();
    package.document_mut();
    let second = dir.path().join("second.docx");
    package.write_back(&second).unwrap();

    let once = read_entry(&first, "word/document.xml").unwrap();
    let twice = read_entry(&second, "word/document.xml").unwrap();
    assert_eq!(String::from_utf8(twice).unwrap(), String::from_utf8(once).unwrap());
}
