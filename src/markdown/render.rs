//! Document tree → Markdown rendering.
//!
//! A single depth-first walk over the parsed [`Node`] tree, dispatching on
//! [`NodeKind`]. Wrapping constructs (hyperlinks, formatted runs, table
//! cells, text boxes) render their children into a scratch buffer first and
//! merge it into the parent stream once the wrapper closes; everything else
//! streams straight into the output.
//!
//! The walker performs no filesystem writes. In extract mode, image
//! payloads are collected into [`Rendering::assets`] for the caller to
//! materialize after the walk.

use std::io::{Read, Seek};

use base64::Engine;

use crate::docx::{MediaAsset, MediaMode, Node, NodeKind, Package};
use crate::error::Result;

use super::escape::escape;
use super::table::render_table;

/// Result of rendering one document.
#[derive(Debug, Clone)]
pub struct Rendering {
    /// The rendered Markdown text.
    pub markdown: String,
    /// Media payloads referenced by the document (extract mode only).
    pub assets: Vec<MediaAsset>,
}

/// Walks a document tree and emits Markdown.
pub struct Renderer<'a, R: Read + Seek> {
    package: &'a mut Package<R>,
    mode: MediaMode,
    assets: Vec<MediaAsset>,
}

impl<'a, R: Read + Seek> Renderer<'a, R> {
    pub fn new(package: &'a mut Package<R>, mode: MediaMode) -> Self {
        Renderer {
            package,
            mode,
            assets: Vec::new(),
        }
    }

    /// Render the tree rooted at `node`, consuming the renderer.
    pub fn render(mut self, node: &Node) -> Result<Rendering> {
        let mut markdown = String::new();
        self.walk(node, &mut markdown)?;
        Ok(Rendering {
            markdown,
            assets: self.assets,
        })
    }

    fn walk(&mut self, node: &Node, out: &mut String) -> Result<()> {
        match node.kind {
            NodeKind::Text => out.push_str(&node.text),

            NodeKind::Hyperlink => {
                let mut label = String::new();
                for child in &node.children {
                    self.walk(child, &mut label)?;
                }
                out.push('[');
                out.push_str(&escape(&label, "[]"));
                out.push_str("](");
                if let Some(id) = node.attr("id")
                    && let Some(rel) = self.package.relationships().lookup(id)
                {
                    out.push_str(&escape(&rel.target, "()"));
                }
                out.push(')');
            }

            NodeKind::ParagraphProps => {
                let mut code = false;
                for child in &node.children {
                    match child.tag.as_str() {
                        "ind" => {
                            if let Some(left) = child.attr("left")
                                && let Ok(twips) = left.parse::<i64>()
                            {
                                for _ in 0..twips / 360 {
                                    out.push(' ');
                                }
                            }
                        }
                        "pStyle" => {
                            if let Some(val) = child.attr("val") {
                                if val == "Code" {
                                    code = true;
                                } else if let Some(level) = self.heading_level(val) {
                                    for _ in 0..level {
                                        out.push('#');
                                    }
                                    out.push(' ');
                                }
                            }
                        }
                        _ => {}
                    }
                }
                if code {
                    out.push('`');
                }
                for child in &node.children {
                    self.walk(child, out)?;
                }
            }

            NodeKind::Table => {
                let mut rows = Vec::new();
                for tr in node.children.iter().filter(|c| c.tag == "tr") {
                    let mut cols = Vec::new();
                    for tc in tr.children.iter().filter(|c| c.tag == "tc") {
                        let mut cell = String::new();
                        self.walk(tc, &mut cell)?;
                        // one line per row in pipe-table syntax
                        cols.push(cell.replace('\n', ""));
                    }
                    rows.push(cols);
                }
                out.push_str(&render_table(&rows));
                out.push('\n');
            }

            NodeKind::Numbering => out.push_str("* "),

            NodeKind::Run => {
                let mut bold = false;
                let mut italic = false;
                let mut strike = false;
                for props in node.children.iter().filter(|c| c.tag == "rPr") {
                    for flag in &props.children {
                        match flag.tag.as_str() {
                            "b" => bold = true,
                            "i" => italic = true,
                            "strike" => strike = true,
                            _ => {}
                        }
                    }
                }

                let mut content = String::new();
                for child in &node.children {
                    self.walk(child, &mut content)?;
                }

                if strike {
                    out.push_str("~~");
                }
                if bold {
                    out.push_str("**");
                }
                if italic {
                    out.push('*');
                }
                out.push_str(&escape(&content, "*~\\"));
                if italic {
                    out.push('*');
                }
                if bold {
                    out.push_str("**");
                }
                if strike {
                    out.push_str("~~");
                }
            }

            NodeKind::Paragraph => {
                for child in &node.children {
                    self.walk(child, out)?;
                }
                // the opening backtick comes from the pPr handler; the
                // pair closes around the whole paragraph
                if paragraph_is_code(node) {
                    out.push('`');
                }
                out.push('\n');
            }

            NodeKind::Image => {
                if let Some(id) = node.attr("embed")
                    && let Some(target) = self
                        .package
                        .relationships()
                        .lookup(id)
                        .map(|rel| rel.target.clone())
                {
                    self.emit_image(&target, out)?;
                }
            }

            NodeKind::Fallback => {}

            NodeKind::TextBox => {
                let mut content = String::new();
                for child in &node.children {
                    self.walk(child, &mut content)?;
                }
                out.push_str("\n```\n");
                out.push_str(&content);
                out.push_str("```\n");
            }

            NodeKind::Other => {
                for child in &node.children {
                    self.walk(child, out)?;
                }
            }
        }

        Ok(())
    }

    /// Resolve a paragraph style token to a heading level.
    ///
    /// A literal `HeadingN` token wins; otherwise the style table is
    /// consulted; a bare integer token is the last resort. `None` means no
    /// heading marker — unresolvable tokens are not errors.
    fn heading_level(&self, val: &str) -> Option<usize> {
        if let Some(rest) = val.strip_prefix("Heading") {
            return rest.parse().ok();
        }
        if let Some(style) = self.package.styles().lookup(val)
            && let Some(level) = style.heading_level()
        {
            return Some(level);
        }
        val.parse().ok()
    }

    fn emit_image(&mut self, target: &str, out: &mut String) -> Result<()> {
        // Documents may reference media absent from the package; skip.
        let Some(data) = self.package.media_bytes(target)? else {
            return Ok(());
        };

        match self.mode {
            MediaMode::Embed => {
                out.push_str("![](data:image/png;base64,");
                out.push_str(&base64::engine::general_purpose::STANDARD.encode(&data));
                out.push(')');
            }
            MediaMode::Extract => {
                out.push_str("![](");
                out.push_str(&escape(target, "()"));
                out.push(')');
                self.assets.push(MediaAsset {
                    path: target.to_string(),
                    data,
                });
            }
        }
        Ok(())
    }
}

/// Whether a paragraph's properties carry the literal `Code` style.
fn paragraph_is_code(node: &Node) -> bool {
    node.children
        .iter()
        .filter(|child| child.kind == NodeKind::ParagraphProps)
        .flat_map(|props| props.children.iter())
        .any(|child| child.tag == "pStyle" && child.attr("val") == Some("Code"))
}
