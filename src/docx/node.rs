//! Generic document XML tree.
//!
//! The main document part is parsed into an untyped [`Node`] tree rather
//! than typed element structs: the renderer only dispatches on a handful of
//! element kinds and passes through everything else transparently, so a
//! generic tree keeps unknown markup (and its reading order) intact.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

/// Element kinds the renderer dispatches on.
///
/// Everything the walker does not recognize collapses into [`Other`],
/// which recurses into children without emitting markup.
///
/// [`Other`]: NodeKind::Other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `t` — literal text leaf.
    Text,
    /// `hyperlink` — link wrapper, target resolved through relationships.
    Hyperlink,
    /// `pPr` — paragraph properties (indentation, style, numbering).
    ParagraphProps,
    /// `tbl` — table.
    Table,
    /// `numPr` — numbering properties, rendered as a list marker.
    Numbering,
    /// `r` — formatted run.
    Run,
    /// `p` — paragraph.
    Paragraph,
    /// `blip` — embedded image reference.
    Image,
    /// `Fallback` — compatibility placeholder, suppressed entirely.
    Fallback,
    /// `txbxContent` — text box body, rendered as a fenced code block.
    TextBox,
    /// Structural passthrough for any other element.
    Other,
}

impl NodeKind {
    fn from_tag(tag: &str) -> Self {
        match tag {
            "t" => NodeKind::Text,
            "hyperlink" => NodeKind::Hyperlink,
            "pPr" => NodeKind::ParagraphProps,
            "tbl" => NodeKind::Table,
            "numPr" => NodeKind::Numbering,
            "r" => NodeKind::Run,
            "p" => NodeKind::Paragraph,
            "blip" => NodeKind::Image,
            "Fallback" => NodeKind::Fallback,
            "txbxContent" => NodeKind::TextBox,
            _ => NodeKind::Other,
        }
    }
}

/// One element of the parsed document tree.
///
/// Children are stored in document reading order and never reordered.
/// `text` accumulates the element's own character data; it is only
/// meaningful for text leaves (`t`).
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    /// Local tag name, namespace prefix stripped.
    pub tag: String,
    /// Attributes in document order, keys reduced to their local name.
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    fn from_element(e: &BytesStart) -> Result<Self> {
        let tag = String::from_utf8_lossy(local_name(e.name().as_ref())).into_owned();
        let mut attrs = Vec::new();
        for attr in e.attributes().flatten() {
            let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
            let value = String::from_utf8(attr.value.to_vec())?;
            attrs.push((key, value));
        }
        Ok(Node {
            kind: NodeKind::from_tag(&tag),
            tag,
            attrs,
            text: String::new(),
            children: Vec::new(),
        })
    }

    /// Look up an attribute by its local name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Parse an XML part into its root [`Node`].
pub fn parse_part(xml: &str) -> Result<Node> {
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => stack.push(Node::from_element(&e)?),
            Ok(Event::Empty(e)) => {
                let node = Node::from_element(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(node),
                    None => root = root.or(Some(node)),
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(resolve_entity(e.as_ref()));
                }
            }
            Ok(Event::End(_)) => {
                if let Some(node) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(node),
                        None => root = root.or(Some(node)),
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e)),
            _ => {}
        }
    }

    root.ok_or_else(|| Error::InvalidDocument("no root element in XML part".into()))
}

/// Extract the local name from a potentially namespaced XML name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
    name.iter()
        .rposition(|&b| b == b':')
        .map(|i| &name[i + 1..])
        .unwrap_or(name)
}

fn resolve_entity(entity: &[u8]) -> &'static str {
    match entity {
        b"apos" => "'",
        b"quot" => "\"",
        b"lt" => "<",
        b"gt" => ">",
        b"amp" => "&",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"w:p"), b"p");
        assert_eq!(local_name(b"p"), b"p");
        assert_eq!(local_name(b"r:embed"), b"embed");
    }

    #[test]
    fn test_parse_preserves_child_order() {
        let root = parse_part(r#"<w:p><w:r><w:t>a</w:t></w:r><w:r><w:t>b</w:t></w:r></w:p>"#)
            .unwrap();
        assert_eq!(root.kind, NodeKind::Paragraph);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children[0].text, "a");
        assert_eq!(root.children[1].children[0].text, "b");
    }

    #[test]
    fn test_parse_attributes_use_local_names() {
        let root = parse_part(r#"<a:blip r:embed="rId4"/>"#).unwrap();
        assert_eq!(root.kind, NodeKind::Image);
        assert_eq!(root.attr("embed"), Some("rId4"));
        assert_eq!(root.attr("missing"), None);
    }

    #[test]
    fn test_parse_resolves_entities() {
        let root = parse_part(r#"<w:t>a &amp; b &lt;c&gt;</w:t>"#).unwrap();
        assert_eq!(root.text, "a & b <c>");
    }

    #[test]
    fn test_parse_preserves_significant_whitespace() {
        let root = parse_part(r#"<w:t xml:space="preserve"> spaced </w:t>"#).unwrap();
        assert_eq!(root.text, " spaced ");
        assert_eq!(root.attr("space"), Some("preserve"));
    }

    #[test]
    fn test_parse_empty_input_is_invalid() {
        assert!(matches!(
            parse_part(""),
            Err(Error::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_unrecognized_tags_are_other() {
        let root = parse_part(r#"<w:bookmarkStart w:id="0"/>"#).unwrap();
        assert_eq!(root.kind, NodeKind::Other);
        assert_eq!(root.tag, "bookmarkStart");
    }
}
