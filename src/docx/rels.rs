//! Relationship table.
//!
//! The relationships part binds short identifiers (`rId4`) to targets:
//! external hyperlink URLs or media paths inside the package. It is loaded
//! once per document and consulted read-only during rendering.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::node::local_name;
use crate::error::{Error, Result};

/// Classification of a relationship's Type URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelKind {
    Hyperlink,
    Image,
    Other,
}

impl RelKind {
    fn from_type_uri(uri: &str) -> Self {
        if uri.ends_with("/hyperlink") {
            RelKind::Hyperlink
        } else if uri.ends_with("/image") {
            RelKind::Image
        } else {
            RelKind::Other
        }
    }
}

/// One identifier → target binding.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub id: String,
    pub kind: RelKind,
    /// Path inside the package, or a URL for external targets.
    pub target: String,
    /// Set when `TargetMode="External"`.
    pub external: bool,
}

/// All relationships of a document, in document order.
///
/// Identifiers are assumed unique; if a document repeats one, the first
/// occurrence wins on lookup. An absent relationships part simply yields an
/// empty table — hyperlinks and images then render without targets.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    entries: Vec<Relationship>,
}

impl Relationships {
    /// Parse the fixed `Relationships`/`Relationship` schema.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if local_name(e.name().as_ref()) == b"Relationship" =>
                {
                    if let Some(rel) = parse_relationship(&e)? {
                        entries.push(rel);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e)),
                _ => {}
            }
        }

        Ok(Relationships { entries })
    }

    /// First relationship with the given identifier, in document order.
    pub fn lookup(&self, id: &str) -> Option<&Relationship> {
        self.entries.iter().find(|rel| rel.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.entries.iter()
    }
}

fn parse_relationship(e: &BytesStart) -> Result<Option<Relationship>> {
    let mut id = String::new();
    let mut type_uri = String::new();
    let mut target = String::new();
    let mut external = false;

    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"Id" => id = String::from_utf8(attr.value.to_vec())?,
            b"Type" => type_uri = String::from_utf8(attr.value.to_vec())?,
            b"Target" => target = String::from_utf8(attr.value.to_vec())?,
            b"TargetMode" => external = attr.value.as_ref() == b"External",
            _ => {}
        }
    }

    if id.is_empty() {
        return Ok(None);
    }
    Ok(Some(Relationship {
        id,
        kind: RelKind::from_type_uri(&type_uri),
        target,
        external,
    }))
}
