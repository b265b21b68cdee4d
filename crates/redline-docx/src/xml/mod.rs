//! Namespaced XML document model.
//!
//! Parts are parsed into a [`DocumentTree`]: an arena of nodes addressed by
//! [`NodeId`] handles, each storing its parent handle. Every component that
//! walks or rewrites a part goes through the primitives here and names
//! elements through the constants in [`names`].

pub mod names;
mod parse;
mod tree;
mod write;

pub use names::XName;
pub use parse::parse;
pub use tree::{Attribute, DocumentTree, Element, Name, NodeData, NodeId};
pub use write::serialize;

/// Declaration written at the top of every serialized part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
