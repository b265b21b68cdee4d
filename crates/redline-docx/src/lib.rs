//! # redline-docx
//!
//! Revision marks and review comments inside a zipped, namespaced-XML
//! document package.
//!
//! ## Layers
//!
//! - [`package`]: opens the archive, hands out parsed parts, and writes the
//!   whole archive back atomically.
//! - [`xml`]: an arena-backed element tree with stable [`xml::NodeId`]
//!   handles and the central namespace table.
//! - [`revisions`] and [`comments`]: catalogs that walk the tree and produce
//!   user-facing listings.
//! - [`mutate`]: apply, reject, and insert operations over the tree.
//! - [`register`] and [`scaffold`]: package plumbing for new parts and new
//!   documents.
//!
//! One invocation loads one package, mutates it in memory, and performs at
//! most one write-back.

pub mod comments;
pub mod error;
pub mod mutate;
pub mod package;
pub mod register;
pub mod revisions;
pub mod scaffold;
pub mod xml;

pub use error::DocxError;
pub use package::DocumentPackage;
pub use revisions::{ChangeIdentity, RevisionMark};
