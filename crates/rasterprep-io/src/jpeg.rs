//! JPEG image format support
//!
//! Reads baseline and progressive JPEGs with `jpeg-decoder` and writes
//! with `jpeg-encoder`. Grayscale is replicated to the pipeline's
//! 3-channel RGB layout on read.

use crate::{IoError, IoResult};
use jpeg_decoder::PixelFormat;
use rasterprep_core::Raster;
use std::io::Read;
use std::path::Path;

/// Default encode quality (0-100).
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image into a 3-channel RGB raster.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Raster> {
    let mut decoder = jpeg_decoder::Decoder::new(reader);
    let pixels = decoder
        .decode()
        .map_err(|e| IoError::Decode(format!("JPEG decode error: {e}")))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::Decode("JPEG header missing after decode".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    let rgb = match info.pixel_format {
        PixelFormat::RGB24 => pixels,
        PixelFormat::L8 => {
            let mut rgb = Vec::with_capacity(pixels.len() * 3);
            for v in pixels {
                rgb.extend_from_slice(&[v, v, v]);
            }
            rgb
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported JPEG pixel format: {other:?}"
            )));
        }
    };

    Raster::from_raw(width, height, 3, rgb).map_err(IoError::Core)
}

/// Write a raster as a JPEG file.
///
/// # Errors
///
/// Returns [`IoError::Encode`] if a dimension exceeds the JPEG limit of
/// 65535 or the encoder fails.
pub fn write_jpeg_file<P: AsRef<Path>>(path: P, raster: &Raster, quality: u8) -> IoResult<()> {
    let width = u16::try_from(raster.width())
        .map_err(|_| IoError::Encode(format!("width {} exceeds JPEG limit", raster.width())))?;
    let height = u16::try_from(raster.height())
        .map_err(|_| IoError::Encode(format!("height {} exceeds JPEG limit", raster.height())))?;

    let color_type = match raster.channels() {
        1 => jpeg_encoder::ColorType::Luma,
        _ => jpeg_encoder::ColorType::Rgb,
    };

    let encoder = jpeg_encoder::Encoder::new_file(path, quality)
        .map_err(|e| IoError::Encode(format!("JPEG encoder error: {e}")))?;
    encoder
        .encode(raster.data(), width, height, color_type)
        .map_err(|e| IoError::Encode(format!("JPEG encode error: {e}")))?;
    Ok(())
}
