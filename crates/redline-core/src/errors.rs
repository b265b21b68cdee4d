//! Cross-cutting error types for redline.
//!
//! Engine errors (`DocxError`) live in `redline-docx`; configuration errors
//! live in `redline-config`. Everything converges on `anyhow` in `redline-cli`.

use thiserror::Error;

/// Errors that can be raised by any redline crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A change kind string did not name a known kind.
    #[error("Unknown change kind: {0}")]
    UnknownKind(String),

    /// Data failed validation (empty text, bad initials, etc.).
    #[error("Validation error: {0}")]
    Validation(String),
}
