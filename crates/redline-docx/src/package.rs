//! Container accessor: loads every part of a document archive into memory
//! and writes the archive back atomically.
//!
//! The archive handle is held only inside [`DocumentPackage::open`]; after
//! that the package owns plain byte blobs, the parsed document tree and,
//! once requested, the parsed comments tree. [`DocumentPackage::write_back`] stages a complete new
//! archive in a temporary file next to the destination and renames it into
//! place, so the destination is either fully replaced or left untouched.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::DocxError;
use crate::xml::names::w;
use crate::xml::{self, DocumentTree};

/// Well-known part names.
pub mod parts {
    pub const DOCUMENT: &str = "word/document.xml";
    pub const COMMENTS: &str = "word/comments.xml";
    pub const STYLES: &str = "word/styles.xml";
    pub const DOCUMENT_RELS: &str = "word/_rels/document.xml.rels";
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";
    pub const PACKAGE_RELS: &str = "_rels/.rels";
    pub const CORE_PROPERTIES: &str = "docProps/core.xml";
    pub const APP_PROPERTIES: &str = "docProps/app.xml";
}

#[derive(Debug, Clone)]
struct PartEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    directory: bool,
}

/// An open document archive.
///
/// Owns the raw parts it was loaded with and the parsed document tree. The
/// comments part is parsed on first use by [`Self::trees`] or
/// [`Self::trees_mut`], so a damaged comments part only affects commands
/// that read or write comments.
#[derive(Debug)]
pub struct DocumentPackage {
    source: PathBuf,
    entries: Vec<PartEntry>,
    document: DocumentTree,
    comments: Option<DocumentTree>,
    comments_loaded: bool,
    document_dirty: bool,
    comments_dirty: bool,
    comments_created: bool,
    replaced: BTreeMap<String, Vec<u8>>,
}

impl DocumentPackage {
    /// Open an archive and parse its document part.
    ///
    /// # Errors
    ///
    /// - [`DocxError::NotFound`] if `path` does not exist.
    /// - [`DocxError::NotADocx`] if its extension is not `.docx`.
    /// - [`DocxError::InvalidFormat`] if it is not a readable zip archive.
    /// - [`DocxError::MissingPart`] if the document part is absent.
    /// - [`DocxError::MalformedXml`] if the document part does not parse.
    pub fn open(path: &Path) -> Result<Self, DocxError> {
        if !path.exists() {
            return Err(DocxError::NotFound {
                path: path.to_path_buf(),
            });
        }
        if !has_docx_extension(path) {
            return Err(DocxError::NotADocx {
                path: path.to_path_buf(),
            });
        }
        let entries = read_entries(path)?;
        tracing::debug!(path = %path.display(), parts = entries.len(), "package: loaded archive");
        Self::from_entries(path.to_path_buf(), entries)
    }

    /// Build a package from in-memory parts (new documents).
    ///
    /// # Errors
    ///
    /// Same parse failures as [`Self::open`].
    pub fn from_parts(source: PathBuf, parts: Vec<(String, Vec<u8>)>) -> Result<Self, DocxError> {
        let entries = parts
            .into_iter()
            .map(|(name, data)| PartEntry {
                name,
                data,
                compression: CompressionMethod::Deflated,
                directory: false,
            })
            .collect();
        Self::from_entries(source, entries)
    }

    fn from_entries(source: PathBuf, entries: Vec<PartEntry>) -> Result<Self, DocxError> {
        let find = |name: &str| {
            entries
                .iter()
                .find(|entry| !entry.directory && entry.name == name)
        };

        let document = find(parts::DOCUMENT).ok_or_else(|| DocxError::MissingPart {
            part: parts::DOCUMENT.to_string(),
        })?;
        let document = xml::parse(parts::DOCUMENT, &document.data)?;

        Ok(Self {
            source,
            entries,
            document,
            comments: None,
            comments_loaded: false,
            document_dirty: false,
            comments_dirty: false,
            comments_created: false,
            replaced: BTreeMap::new(),
        })
    }

    /// Raw bytes of a part, including parts replaced via [`Self::set_part`].
    ///
    /// # Errors
    ///
    /// Returns [`DocxError::MissingPart`] if no such part exists.
    pub fn read_part(&self, name: &str) -> Result<&[u8], DocxError> {
        if let Some(bytes) = self.replaced.get(name) {
            return Ok(bytes);
        }
        self.entries
            .iter()
            .find(|entry| !entry.directory && entry.name == name)
            .map(|entry| entry.data.as_slice())
            .ok_or_else(|| DocxError::MissingPart {
                part: name.to_string(),
            })
    }

    #[must_use]
    pub fn has_part(&self, name: &str) -> bool {
        self.read_part(name).is_ok()
    }

    /// Replace (or add) a raw part; written on the next write-back.
    pub fn set_part(&mut self, name: &str, bytes: Vec<u8>) {
        self.replaced.insert(name.to_string(), bytes);
    }

    #[must_use]
    pub const fn document(&self) -> &DocumentTree {
        &self.document
    }

    /// Mutable document tree; the document part will be reserialized.
    pub fn document_mut(&mut self) -> &mut DocumentTree {
        self.document_dirty = true;
        &mut self.document
    }

    fn load_comments(&mut self) -> Result<(), DocxError> {
        if self.comments_loaded {
            return Ok(());
        }
        self.comments = self
            .entries
            .iter()
            .find(|entry| !entry.directory && entry.name == parts::COMMENTS)
            .map(|entry| xml::parse(parts::COMMENTS, &entry.data))
            .transpose()?;
        self.comments_loaded = true;
        Ok(())
    }

    /// Document tree and, when the package has one, the comments tree.
    ///
    /// # Errors
    ///
    /// Returns [`DocxError::MalformedXml`] if the comments part does not parse.
    pub fn trees(&mut self) -> Result<(&DocumentTree, Option<&DocumentTree>), DocxError> {
        self.load_comments()?;
        Ok((&self.document, self.comments.as_ref()))
    }

    /// Whether the comments part did not exist when the package was loaded
    /// and has been created since.
    #[must_use]
    pub const fn comments_created(&self) -> bool {
        self.comments_created
    }

    /// Document and comments trees together, creating an empty comments
    /// part if the package has none. Both parts will be reserialized.
    ///
    /// # Errors
    ///
    /// Returns [`DocxError::MalformedXml`] if the comments part does not parse.
    pub fn trees_mut(&mut self) -> Result<(&mut DocumentTree, &mut DocumentTree), DocxError> {
        self.load_comments()?;
        self.document_dirty = true;
        self.comments_dirty = true;
        if self.comments.is_none() {
            tracing::debug!("package: creating comments part");
            self.comments_created = true;
        }
        let comments = self
            .comments
            .get_or_insert_with(|| DocumentTree::with_root(w::COMMENTS));
        Ok((&mut self.document, comments))
    }

    /// Write every part to `destination`, consuming the package.
    ///
    /// The archive is staged in a temporary file in the destination's
    /// directory and atomically renamed over the destination. On any error
    /// the destination keeps its previous content. Each part is written
    /// exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`DocxError::WriteFailure`] if staging or the rename fails,
    /// or [`DocxError::MalformedXml`] if a tree cannot be serialized.
    pub fn write_back(self, destination: &Path) -> Result<(), DocxError> {
        let mut staged = self.replaced;
        if self.document_dirty {
            staged.insert(
                parts::DOCUMENT.to_string(),
                xml::serialize(parts::DOCUMENT, &self.document)?,
            );
        }
        if self.comments_dirty {
            if let Some(comments) = &self.comments {
                staged.insert(
                    parts::COMMENTS.to_string(),
                    xml::serialize(parts::COMMENTS, comments)?,
                );
            }
        }

        let directory = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut temp = tempfile::Builder::new()
            .prefix(".redline-")
            .suffix(".tmp")
            .tempfile_in(&directory)
            .map_err(|err| DocxError::write_failure(destination, err))?;

        let written = {
            let mut zip = ZipWriter::new(temp.as_file_mut());
            let mut count = 0usize;
            for entry in &self.entries {
                if entry.directory {
                    zip.add_directory(entry.name.as_str(), options(CompressionMethod::Stored))
                        .map_err(|err| DocxError::write_failure(destination, err))?;
                    continue;
                }
                let replacement = staged.remove(&entry.name);
                let data = replacement.as_deref().unwrap_or(&entry.data);
                write_entry(&mut zip, &entry.name, data, entry.compression)
                    .map_err(|err| DocxError::write_failure(destination, err))?;
                count += 1;
            }
            for (name, data) in &staged {
                write_entry(&mut zip, name, data, CompressionMethod::Deflated)
                    .map_err(|err| DocxError::write_failure(destination, err))?;
                count += 1;
            }
            zip.finish()
                .map_err(|err| DocxError::write_failure(destination, err))?;
            count
        };

        temp.as_file()
            .sync_all()
            .map_err(|err| DocxError::write_failure(destination, err))?;
        if let Some(permissions) = [destination, self.source.as_path()]
            .iter()
            .find_map(|path| std::fs::metadata(path).ok())
            .map(|meta| meta.permissions())
        {
            if let Err(err) = temp.as_file().set_permissions(permissions) {
                tracing::warn!(
                    destination = %destination.display(),
                    error = %err,
                    "package: could not carry file permissions over; written with defaults"
                );
            }
        }
        temp.persist(destination)
            .map_err(|err| DocxError::write_failure(destination, err.error))?;

        tracing::info!(
            destination = %destination.display(),
            parts = written,
            "package: write-back committed"
        );
        Ok(())
    }
}

fn has_docx_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

fn read_entries(path: &Path) -> Result<Vec<PartEntry>, DocxError> {
    let invalid = |reason: String| DocxError::InvalidFormat {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|err| invalid(err.to_string()))?;
    let mut archive =
        ZipArchive::new(BufReader::new(file)).map_err(|err| invalid(err.to_string()))?;

    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|err| invalid(err.to_string()))?;
        let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry
            .read_to_end(&mut data)
            .map_err(|err| invalid(format!("{}: {err}", entry.name())))?;
        entries.push(PartEntry {
            name: entry.name().to_string(),
            compression: entry.compression(),
            directory: entry.is_dir(),
            data,
        });
    }
    Ok(entries)
}

fn options(method: CompressionMethod) -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(method)
}

fn write_entry<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    name: &str,
    data: &[u8],
    original: CompressionMethod,
) -> Result<(), String> {
    let method = if original == CompressionMethod::Stored {
        CompressionMethod::Stored
    } else {
        CompressionMethod::Deflated
    };
    zip.start_file(name, options(method))
        .map_err(|err| err.to_string())?;
    zip.write_all(data).map_err(|err| err.to_string())
}
