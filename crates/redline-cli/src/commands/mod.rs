pub mod apply_all;
pub mod create_document;
pub mod dispatch;
pub mod insert_change;
pub mod insert_comment;
pub mod list_changes;
pub mod list_comments;
pub mod resolve;
pub mod shared;

#[cfg(test)]
pub mod test_support {
    use std::path::Path;

    use redline_core::enums::ChangeKind;
    use redline_docx::DocumentPackage;
    use redline_docx::mutate::{self, Anchor, NewComment, NewMark};
    use redline_docx::scaffold::{self, NewDocument};
    use redline_docx::xml::names::w;

    const DATE: &str = "2024-06-01T12:00:00Z";

    /// One-paragraph document reading "The quick brown fox".
    pub fn plain_document(dir: &Path) -> String {
        let path = dir.join("draft.docx");
        scaffold::create_document(
            &path,
            &NewDocument {
                text: Some("The quick brown fox".to_string()),
                title: None,
                creator: "Fixture".to_string(),
                created: DATE.to_string(),
            },
        )
        .unwrap();
        path.display().to_string()
    }

    /// `plain_document` with `(kind, text, author)` marks appended in order.
    pub fn document_with_marks(dir: &Path, marks: &[(ChangeKind, &str, &str)]) -> String {
        let path = plain_document(dir);
        let mut package = DocumentPackage::open(Path::new(&path)).unwrap();
        for (kind, text, author) in marks {
            let mark = NewMark {
                kind: *kind,
                text: (*text).to_string(),
                author: (*author).to_string(),
                date: DATE.to_string(),
            };
            mutate::insert_mark(package.document_mut(), &mark, Anchor::End).unwrap();
        }
        package.write_back(Path::new(&path)).unwrap();
        path
    }

    pub fn comment_on(path: &str, text: &str, author: &str) {
        let mut package = DocumentPackage::open(Path::new(path)).unwrap();
        let comment = NewComment {
            text: text.to_string(),
            author: author.to_string(),
            initials: redline_core::entities::derive_initials(author),
            date: DATE.to_string(),
        };
        mutate::add_comment(&mut package, &comment, Anchor::End).unwrap();
        package.write_back(Path::new(path)).unwrap();
    }

    /// Live body text: text leaves only, deleted text excluded.
    pub fn body_text(path: &str) -> String {
        let package = DocumentPackage::open(Path::new(path)).unwrap();
        let tree = package.document();
        tree.text(tree.root(), &[w::T])
    }
}
