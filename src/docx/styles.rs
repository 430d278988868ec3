//! Style table.
//!
//! Only a small slice of the styles part matters for Markdown output: the
//! style identifier, its display name, and the paragraph formatting hints
//! (outline level, left indentation). Everything else in the style cascade
//! is ignored. An absent styles part yields an empty table; heading
//! resolution then falls back to parsing the style token itself.

use quick_xml::Reader;
use quick_xml::events::Event;

use super::node::local_name;
use crate::error::{Error, Result};

/// Formatting hints for one named style.
#[derive(Debug, Clone, Default)]
pub struct StyleEntry {
    pub id: String,
    pub name: String,
    /// Heading outline level, zero-based (`outlineLvl`).
    pub outline: Option<usize>,
    /// Left indentation in twentieths of a point (`ind left`).
    pub indent_left: Option<i64>,
}

impl StyleEntry {
    /// Heading level implied by this style, if any.
    ///
    /// A name like `Heading 3` (any case) wins; otherwise a declared
    /// outline level maps to its one-based heading level.
    pub fn heading_level(&self) -> Option<usize> {
        if let Some(rest) = self
            .name
            .strip_prefix("Heading")
            .or_else(|| self.name.strip_prefix("heading"))
            && let Ok(level) = rest.trim().parse()
        {
            return Some(level);
        }
        self.outline.map(|level| level + 1)
    }
}

/// All style entries of a document, in document order.
#[derive(Debug, Clone, Default)]
pub struct Styles {
    entries: Vec<StyleEntry>,
}

impl Styles {
    /// Parse the styles part, keeping only the hints listed on
    /// [`StyleEntry`].
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut entries = Vec::new();
        let mut current: Option<StyleEntry> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let local = local_name(e.name().as_ref()).to_vec();
                    if local == b"style" {
                        let mut entry = StyleEntry::default();
                        for attr in e.attributes().flatten() {
                            if local_name(attr.key.as_ref()) == b"styleId" {
                                entry.id = String::from_utf8(attr.value.to_vec())?;
                            }
                        }
                        current = Some(entry);
                    } else if let Some(entry) = current.as_mut() {
                        read_style_hint(&e, &local, entry)?;
                    }
                }
                Ok(Event::Empty(e)) => {
                    if let Some(entry) = current.as_mut() {
                        let local = local_name(e.name().as_ref()).to_vec();
                        read_style_hint(&e, &local, entry)?;
                    }
                }
                Ok(Event::End(e)) => {
                    if local_name(e.name().as_ref()) == b"style"
                        && let Some(entry) = current.take()
                        && !entry.id.is_empty()
                    {
                        entries.push(entry);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e)),
                _ => {}
            }
        }

        Ok(Styles { entries })
    }

    /// First style entry with the given identifier.
    pub fn lookup(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.iter().find(|style| style.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn read_style_hint(
    e: &quick_xml::events::BytesStart,
    local: &[u8],
    entry: &mut StyleEntry,
) -> Result<()> {
    match local {
        b"name" => {
            if let Some(val) = attr_value(e, b"val")? {
                entry.name = val;
            }
        }
        b"outlineLvl" => {
            if let Some(val) = attr_value(e, b"val")? {
                entry.outline = val.parse().ok();
            }
        }
        b"ind" => {
            if let Some(val) = attr_value(e, b"left")? {
                entry.indent_left = val.parse().ok();
            }
        }
        _ => {}
    }
    Ok(())
}

fn attr_value(e: &quick_xml::events::BytesStart, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes().flatten() {
        if local_name(attr.key.as_ref()) == name {
            return Ok(Some(String::from_utf8(attr.value.to_vec())?));
        }
    }
    Ok(None)
}
