//! Namespace URIs and qualified names used by the engine.
//!
//! Elements and attributes are matched by resolved namespace URI plus local
//! name, never by prefix. Prefixes are only chosen when a new element or
//! attribute is created (see [`preferred_prefix`]).

/// Namespace URI + local name.
///
/// An empty `namespace` means "no namespace" (plain attributes such as
/// `PartName` in the content-types part).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XName {
    pub namespace: &'static str,
    pub local: &'static str,
}

impl XName {
    #[must_use]
    pub const fn new(namespace: &'static str, local: &'static str) -> Self {
        Self { namespace, local }
    }

    #[must_use]
    pub const fn unqualified(local: &'static str) -> Self {
        Self::new(NO_NAMESPACE, local)
    }
}

pub const NO_NAMESPACE: &str = "";

pub const WORDPROCESSING: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
pub const CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
pub const PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
pub const OFFICE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const CORE_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";
pub const EXTENDED_PROPERTIES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties";
pub const DUBLIN_CORE: &str = "http://purl.org/dc/elements/1.1/";
pub const DUBLIN_CORE_TERMS: &str = "http://purl.org/dc/terms/";
pub const SCHEMA_INSTANCE: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Prefix to bind when a namespace has to be declared on a part.
///
/// `None` means the namespace is conventionally the default namespace.
#[must_use]
pub fn preferred_prefix(namespace: &str) -> Option<&'static str> {
    match namespace {
        WORDPROCESSING => Some("w"),
        XML => Some("xml"),
        OFFICE_RELATIONSHIPS => Some("r"),
        CORE_PROPERTIES => Some("cp"),
        EXTENDED_PROPERTIES => Some("ep"),
        DUBLIN_CORE => Some("dc"),
        DUBLIN_CORE_TERMS => Some("dcterms"),
        SCHEMA_INSTANCE => Some("xsi"),
        _ => None,
    }
}

/// WordprocessingML elements and attributes.
pub mod w {
    use super::{WORDPROCESSING, XName};

    const fn w(local: &'static str) -> XName {
        XName::new(WORDPROCESSING, local)
    }

    pub const DOCUMENT: XName = w("document");
    pub const BODY: XName = w("body");
    pub const P: XName = w("p");
    pub const PPR: XName = w("pPr");
    pub const R: XName = w("r");
    pub const RPR: XName = w("rPr");
    pub const T: XName = w("t");
    pub const INSTR_TEXT: XName = w("instrText");
    pub const DEL_TEXT: XName = w("delText");
    pub const DEL_INSTR_TEXT: XName = w("delInstrText");
    pub const SECT_PR: XName = w("sectPr");

    pub const INS: XName = w("ins");
    pub const DEL: XName = w("del");
    pub const RPR_CHANGE: XName = w("rPrChange");
    pub const PPR_CHANGE: XName = w("pPrChange");

    pub const COMMENTS: XName = w("comments");
    pub const COMMENT: XName = w("comment");
    pub const COMMENT_RANGE_START: XName = w("commentRangeStart");
    pub const COMMENT_RANGE_END: XName = w("commentRangeEnd");
    pub const COMMENT_REFERENCE: XName = w("commentReference");

    pub const STYLES: XName = w("styles");
    pub const STYLE: XName = w("style");
    pub const NAME: XName = w("name");
    pub const SPACING: XName = w("spacing");
    pub const RFONTS: XName = w("rFonts");
    pub const SZ: XName = w("sz");
    pub const SZ_CS: XName = w("szCs");

    pub const ID: XName = w("id");
    pub const AUTHOR: XName = w("author");
    pub const DATE: XName = w("date");
    pub const INITIALS: XName = w("initials");
    pub const VAL: XName = w("val");
    pub const TYPE: XName = w("type");
    pub const STYLE_ID: XName = w("styleId");
    pub const AFTER: XName = w("after");
    pub const LINE: XName = w("line");
    pub const LINE_RULE: XName = w("lineRule");
    pub const ASCII: XName = w("ascii");
    pub const H_ANSI: XName = w("hAnsi");
}

/// `xml:space`, for text leaves with significant surrounding whitespace.
pub const XML_SPACE: XName = XName::new(XML, "space");

/// `[Content_Types].xml` vocabulary.
pub mod content_types {
    use super::{CONTENT_TYPES, XName};

    pub const TYPES: XName = XName::new(CONTENT_TYPES, "Types");
    pub const DEFAULT: XName = XName::new(CONTENT_TYPES, "Default");
    pub const OVERRIDE: XName = XName::new(CONTENT_TYPES, "Override");

    pub const EXTENSION: XName = XName::unqualified("Extension");
    pub const PART_NAME: XName = XName::unqualified("PartName");
    pub const CONTENT_TYPE: XName = XName::unqualified("ContentType");
}

/// Relationship-part vocabulary (`_rels/*.rels`).
pub mod relationships {
    use super::{PACKAGE_RELATIONSHIPS, XName};

    pub const RELATIONSHIPS: XName = XName::new(PACKAGE_RELATIONSHIPS, "Relationships");
    pub const RELATIONSHIP: XName = XName::new(PACKAGE_RELATIONSHIPS, "Relationship");

    pub const ID: XName = XName::unqualified("Id");
    pub const TYPE: XName = XName::unqualified("Type");
    pub const TARGET: XName = XName::unqualified("Target");
}
