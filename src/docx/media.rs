//! Media payloads referenced by the document.
//!
//! The renderer never touches the filesystem: in extract mode it collects
//! each referenced payload as a [`MediaAsset`] and the caller decides when
//! (and under which root) to materialize them. Writes are not transactional:
//! a failure partway through leaves earlier files in place.

use std::fs;
use std::io;
use std::path::Path;

/// How image payloads are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MediaMode {
    /// Inline payloads as `data:` URIs.
    Embed,
    /// Reference payloads by path and hand them back as [`MediaAsset`]s.
    #[default]
    Extract,
}

/// One payload to materialize, collected during rendering.
#[derive(Debug, Clone)]
pub struct MediaAsset {
    /// Relationship target, relative (e.g. `media/image1.png`).
    pub path: String,
    pub data: Vec<u8>,
}

/// Write collected assets relative to the current working directory.
pub fn write_assets(assets: &[MediaAsset]) -> io::Result<()> {
    write_assets_to(".", assets)
}

/// Write collected assets relative to `base`, creating missing parent
/// directories.
pub fn write_assets_to<P: AsRef<Path>>(base: P, assets: &[MediaAsset]) -> io::Result<()> {
    for asset in assets {
        let path = base.as_ref().join(&asset.path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &asset.data)?;
    }
    Ok(())
}
