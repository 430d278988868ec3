//! Document package reading.
//!
//! A document is a ZIP container with parts at fixed conventional paths:
//! `word/document.xml` (mandatory), `word/_rels/document.xml.rels` and
//! `word/styles.xml` (optional, degrading to empty tables when absent),
//! and binary media under `word/media/`.

mod media;
mod node;
mod rels;
mod styles;

pub use media::{MediaAsset, MediaMode, write_assets, write_assets_to};
pub use node::{Node, NodeKind, parse_part};
pub use rels::{RelKind, Relationship, Relationships};
pub use styles::{StyleEntry, Styles};

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::markdown::{Renderer, Rendering};

const DOCUMENT_PART: &str = "word/document.xml";
const RELS_PART: &str = "word/_rels/document.xml.rels";
const STYLES_PART: &str = "word/styles.xml";
const MEDIA_PREFIX: &str = "word/";

/// Conversion options.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// How image payloads are emitted.
    pub media: MediaMode,
}

/// An opened document package with its metadata parts loaded.
///
/// The relationship and style tables are read once at open time; the
/// document tree and media payloads are read on demand.
pub struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
    rels: Relationships,
    styles: Styles,
}

impl Package<File> {
    /// Open a document package on disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Package::from_reader(file)
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a document package from any [`Read`] + [`Seek`] source.
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)?;

        let rels = match read_part(&mut archive, RELS_PART)? {
            Some(xml) => Relationships::parse(&xml)?,
            None => Relationships::default(),
        };
        let styles = match read_part(&mut archive, STYLES_PART)? {
            Some(xml) => Styles::parse(&xml)?,
            None => Styles::default(),
        };

        Ok(Package {
            archive,
            rels,
            styles,
        })
    }

    /// Parse the main document part into its node tree.
    pub fn document(&mut self) -> Result<Node> {
        let xml = read_part(&mut self.archive, DOCUMENT_PART)?
            .ok_or_else(|| Error::InvalidDocument(format!("{DOCUMENT_PART} not found")))?;
        parse_part(&xml)
    }

    pub fn relationships(&self) -> &Relationships {
        &self.rels
    }

    pub fn styles(&self) -> &Styles {
        &self.styles
    }

    /// Read a media payload by relationship target.
    ///
    /// Returns `Ok(None)` when the package has no such entry — documents
    /// may reference media that were never packaged.
    pub fn media_bytes(&mut self, target: &str) -> Result<Option<Vec<u8>>> {
        let path = format!("{MEDIA_PREFIX}{target}");
        match self.archive.by_name(&path) {
            Ok(mut entry) => {
                // size the buffer from the declared uncompressed size;
                // short entries are tolerated, read errors are not
                let mut data = Vec::with_capacity(entry.size() as usize);
                entry.read_to_end(&mut data)?;
                Ok(Some(data))
            }
            Err(ZipError::FileNotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Convert a document on disk to Markdown.
///
/// # Example
///
/// ```no_run
/// use docmark::{ConvertOptions, convert_file};
///
/// let rendering = convert_file("report.docx", &ConvertOptions::default())?;
/// print!("{}", rendering.markdown);
/// docmark::write_assets(&rendering.assets)?;
/// # Ok::<(), docmark::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P, options: &ConvertOptions) -> Result<Rendering> {
    let file = File::open(path)?;
    convert_reader(file, options)
}

/// Convert a document from any [`Read`] + [`Seek`] source.
///
/// Useful for in-memory buffers or network streams.
pub fn convert_reader<R: Read + Seek>(reader: R, options: &ConvertOptions) -> Result<Rendering> {
    let mut package = Package::from_reader(reader)?;
    let document = package.document()?;
    Renderer::new(&mut package, options.media).render(&document)
}

fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Option<String>> {
    match archive.by_name(path) {
        Ok(mut entry) => {
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            let bytes = strip_bom(&bytes);
            Ok(Some(String::from_utf8(bytes.to_vec())?))
        }
        Err(ZipError::FileNotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Strip a UTF-8 BOM (byte order mark) if present.
fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}
