use std::path::{Path, PathBuf};

use redline_docx::DocumentPackage;
use redline_docx::mutate::Anchor;

pub fn open(document: &str) -> anyhow::Result<DocumentPackage> {
    Ok(DocumentPackage::open(Path::new(document))?)
}

/// `-o` when given, otherwise the input document itself.
#[must_use]
pub fn destination(document: &str, output: Option<&str>) -> PathBuf {
    PathBuf::from(output.unwrap_or(document))
}

#[must_use]
pub const fn anchor(paragraph: Option<usize>) -> Anchor {
    match paragraph {
        Some(index) => Anchor::Paragraph(index),
        None => Anchor::End,
    }
}

/// Write the package to `destination` and return the path as displayed.
pub fn commit(package: DocumentPackage, destination: &Path) -> anyhow::Result<String> {
    package.write_back(destination)?;
    tracing::info!(path = %destination.display(), "document written");
    Ok(destination.display().to_string())
}
