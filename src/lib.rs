//! # docmark
//!
//! A fast, lightweight DOCX to Markdown converter.
//!
//! ## Features
//!
//! - Paragraphs, headings, lists, formatted runs (bold/italic/strike)
//! - Hyperlink and image resolution through the package relationship table
//! - Pipe tables with display-width column alignment (CJK aware)
//! - Media extraction to disk, or inline embedding as `data:` URIs
//!
//! ## Quick Start
//!
//! ```no_run
//! use docmark::{ConvertOptions, MediaMode, convert_file, write_assets};
//!
//! // Convert a document, writing referenced images next to the output
//! let rendering = convert_file("report.docx", &ConvertOptions::default())?;
//! print!("{}", rendering.markdown);
//! write_assets(&rendering.assets)?;
//!
//! // Or inline images as data URIs instead
//! let options = ConvertOptions { media: MediaMode::Embed };
//! let rendering = convert_file("report.docx", &options)?;
//! # Ok::<(), docmark::Error>(())
//! ```
//!
//! ## Degradation
//!
//! Optional package parts degrade gracefully: a missing relationships part
//! leaves hyperlinks without targets (`[text]()`), a missing styles part
//! falls back to parsing style tokens directly, and media referenced but
//! absent from the package are skipped. Only a missing main document part
//! is a fatal error.

pub mod docx;
pub mod error;
pub mod markdown;

pub use docx::{
    ConvertOptions, MediaAsset, MediaMode, Package, convert_file, convert_reader, write_assets,
    write_assets_to,
};
pub use error::{Error, Result};
pub use markdown::{Renderer, Rendering};
