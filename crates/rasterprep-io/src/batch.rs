//! Batch discovery
//!
//! Enumerates the image files under an input directory. Filesystem
//! enumeration order is platform-dependent, so the result is sorted by
//! path to make batch runs reproducible.

use crate::format::has_image_extension;
use crate::{IoError, IoResult};
use std::path::{Path, PathBuf};

/// List the image files directly under `dir`, sorted by path.
///
/// Only regular files with a recognized image extension are returned;
/// subdirectories are not descended into.
pub fn list_images<P: AsRef<Path>>(dir: P) -> IoResult<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(IoError::Io)? {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
