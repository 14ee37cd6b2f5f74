//! rasterprep-io - Image I/O for the rasterprep normalizer
//!
//! Decoding and encoding between files and the in-memory [`Raster`]
//! representation, plus batch discovery:
//!
//! - [`read_image`] sniffs the format from magic bytes (PNG, JPEG) and
//!   decodes to 3-channel RGB
//! - [`write_image`] picks the output format from the destination
//!   extension (PNG unless .jpg/.jpeg)
//! - [`list_images`] enumerates an input directory deterministically

pub mod batch;
pub mod error;
pub mod format;
pub mod jpeg;
pub mod png;

pub use batch::list_images;
pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes, has_image_extension};

use rasterprep_core::Raster;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image from a file path, decoding to a 3-channel RGB raster.
///
/// The format is detected from the file's magic bytes, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Raster> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path).map_err(IoError::Io)?);
    match format {
        ImageFormat::Png => png::read_png(reader),
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
    }
}

/// Write an image to a file path.
///
/// The format follows the destination extension: `.jpg`/`.jpeg` writes
/// JPEG (default quality), anything else writes PNG.
pub fn write_image<P: AsRef<Path>>(raster: &Raster, path: P) -> IoResult<()> {
    let path = path.as_ref();
    match ImageFormat::from_extension(path) {
        ImageFormat::Png => {
            let writer = BufWriter::new(File::create(path).map_err(IoError::Io)?);
            png::write_png(writer, raster)
        }
        ImageFormat::Jpeg => jpeg::write_jpeg_file(path, raster, jpeg::DEFAULT_QUALITY),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_round_trip_by_path() {
        let dir = std::env::temp_dir().join("rasterprep-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("image.png");

        let data: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 17 % 256) as u8).collect();
        let raster = Raster::from_raw(4, 4, 3, data).unwrap();
        write_image(&raster, &path).unwrap();
        let back = read_image(&path).unwrap();
        assert_eq!(back, raster);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_read_image_missing_file() {
        assert!(matches!(
            read_image("/nonexistent/rasterprep.png"),
            Err(IoError::Io(_))
        ));
    }

    #[test]
    fn test_read_image_rejects_non_image() {
        let dir = std::env::temp_dir().join("rasterprep-io-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bogus.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        assert!(matches!(
            read_image(&path),
            Err(IoError::UnsupportedFormat(_))
        ));
        std::fs::remove_file(&path).ok();
    }
}
