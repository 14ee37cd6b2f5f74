//! PNG image format support
//!
//! Decodes any PNG the `png` crate can normalize to 8-bit (indexed and
//! 16-bit images included) and flattens it to the 3-channel RGB layout the
//! pipeline works in. Alpha is dropped; grayscale is replicated.

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use rasterprep_core::Raster;
use std::io::{BufRead, Seek, Write};

/// Read a PNG image into a 3-channel RGB raster.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Raster> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::Decode(format!("PNG decode error: {e}")))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::Decode("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::Decode(format!("PNG frame error: {e}")))?;

    let width = info.width;
    let height = info.height;
    let data = &buf[..info.buffer_size()];
    let line = info.line_size;

    let mut rgb = Vec::with_capacity(width as usize * height as usize * 3);
    match info.color_type {
        ColorType::Grayscale => {
            for y in 0..height as usize {
                for &v in &data[y * line..y * line + width as usize] {
                    rgb.extend_from_slice(&[v, v, v]);
                }
            }
        }
        ColorType::GrayscaleAlpha => {
            for y in 0..height as usize {
                let row = &data[y * line..y * line + width as usize * 2];
                for px in row.chunks_exact(2) {
                    rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                }
            }
        }
        ColorType::Rgb => {
            for y in 0..height as usize {
                rgb.extend_from_slice(&data[y * line..y * line + width as usize * 3]);
            }
        }
        ColorType::Rgba => {
            for y in 0..height as usize {
                let row = &data[y * line..y * line + width as usize * 4];
                for px in row.chunks_exact(4) {
                    rgb.extend_from_slice(&px[..3]);
                }
            }
        }
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG color type after normalization: {other:?}"
            )));
        }
    }

    Raster::from_raw(width, height, 3, rgb).map_err(IoError::Core)
}

/// Write a raster as an 8-bit PNG (RGB or grayscale, by channel count).
pub fn write_png<W: Write>(writer: W, raster: &Raster) -> IoResult<()> {
    let color_type = match raster.channels() {
        1 => ColorType::Grayscale,
        _ => ColorType::Rgb,
    };

    let mut encoder = Encoder::new(writer, raster.width(), raster.height());
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::Encode(format!("PNG header error: {e}")))?;
    writer
        .write_image_data(raster.data())
        .map_err(|e| IoError::Encode(format!("PNG write error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_rgb() -> Raster {
        let data: Vec<u8> = (0..6 * 4 * 3).map(|i| (i * 11 % 256) as u8).collect();
        Raster::from_raw(6, 4, 3, data).unwrap()
    }

    #[test]
    fn test_png_round_trip_rgb() {
        let raster = sample_rgb();
        let mut encoded = Vec::new();
        write_png(&mut encoded, &raster).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_png_grayscale_decodes_to_rgb() {
        let gray = Raster::from_raw(3, 2, 1, vec![0, 50, 100, 150, 200, 250]).unwrap();
        let mut encoded = Vec::new();
        write_png(&mut encoded, &gray).unwrap();
        let decoded = read_png(Cursor::new(encoded)).unwrap();
        assert_eq!(decoded.channels(), 3);
        assert_eq!(decoded.pixel(1, 0), &[50, 50, 50]);
    }

    #[test]
    fn test_png_garbage_input_fails() {
        assert!(matches!(
            read_png(Cursor::new(b"not a png".to_vec())),
            Err(IoError::Decode(_))
        ));
    }
}
