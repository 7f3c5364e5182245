//! PNG output for rendered heat maps.
//!
//! Supports two encoding modes:
//! - **Indexed PNG (color type 3)**: Used when the image has ≤256 unique
//!   colors, which covers almost every block-rendered heat map.
//! - **RGBA PNG (color type 6)**: Fallback for images with >256 colors.
//!
//! Both are lossless. [`PngFile`] is the default [`ImageSink`] and writes
//! `<name>.png`.

use std::collections::HashMap;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::color::{Color, ColorMapper};
use crate::error::{HeatMapError, HeatMapResult};
use crate::grid::HeatMap;
use crate::raster::{image_dimensions, rasterize, PixelBuffer};

/// Maximum colors for indexed PNG (PNG8)
const MAX_PALETTE_SIZE: usize = 256;

const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const COLOR_TYPE_INDEXED: u8 = 3;
const COLOR_TYPE_RGBA: u8 = 6;

/// Largest width or height an IHDR chunk may declare.
const MAX_PNG_DIMENSION: u32 = i32::MAX as u32;

/// Destination for finished pixel buffers.
pub trait ImageSink {
    /// Persist `buffer` under the base name `name`, returning the path
    /// actually written.
    fn write(&self, buffer: &PixelBuffer, name: &Path) -> HeatMapResult<PathBuf>;
}

/// Writes buffers as `<name>.png` on the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngFile;

impl ImageSink for PngFile {
    fn write(&self, buffer: &PixelBuffer, name: &Path) -> HeatMapResult<PathBuf> {
        check_name(name)?;

        let bytes = encode_png(buffer)?;
        let path = png_path(name);
        std::fs::write(&path, &bytes)?;

        tracing::info!(
            path = %path.display(),
            width = buffer.width(),
            height = buffer.height(),
            bytes = bytes.len(),
            "Wrote heat map image"
        );

        Ok(path)
    }
}

/// Append the `.png` extension to a base name. An existing extension is
/// kept, so `scores.v2` becomes `scores.v2.png`.
pub fn png_path(name: &Path) -> PathBuf {
    let mut path = OsString::from(name.as_os_str());
    path.push(".png");
    PathBuf::from(path)
}

fn check_name(name: &Path) -> HeatMapResult<()> {
    if name.as_os_str().is_empty() {
        return Err(HeatMapError::EmptyName);
    }
    Ok(())
}

/// Rasterize a heat map and write it to `<name>.png`.
///
/// Returns the rendered buffer. Nothing is written if the block size, the
/// name or any mapped score is invalid.
pub fn render_to_file<M>(
    heatmap: &HeatMap,
    block_size: usize,
    name: impl AsRef<Path>,
    mapper: &M,
) -> HeatMapResult<PixelBuffer>
where
    M: ColorMapper + ?Sized,
{
    render_with_sink(heatmap, block_size, name, mapper, &PngFile)
}

/// Rasterize a heat map and hand the buffer to `sink`.
pub fn render_with_sink<M, S>(
    heatmap: &HeatMap,
    block_size: usize,
    name: impl AsRef<Path>,
    mapper: &M,
    sink: &S,
) -> HeatMapResult<PixelBuffer>
where
    M: ColorMapper + ?Sized,
    S: ImageSink + ?Sized,
{
    let name = name.as_ref();
    image_dimensions(heatmap, block_size)?;
    check_name(name)?;

    let buffer = rasterize(heatmap, block_size, mapper)?;
    sink.write(&buffer, name)?;

    Ok(buffer)
}

/// Encode a pixel buffer as PNG, choosing indexed color when the buffer
/// has few enough distinct colors and RGBA otherwise.
pub fn encode_png(buffer: &PixelBuffer) -> HeatMapResult<Vec<u8>> {
    match extract_palette(buffer) {
        Some((palette, indices)) => encode_png_indexed(buffer, &palette, &indices),
        None => encode_png_rgba(buffer),
    }
}

/// Encode a pixel buffer as an RGBA PNG (color type 6).
pub fn encode_png_rgba(buffer: &PixelBuffer) -> HeatMapResult<Vec<u8>> {
    let mut png = start_png(buffer, COLOR_TYPE_RGBA)?;

    let idat = deflate_scanlines(buffer.as_bytes(), buffer.width() * 4, buffer.height())?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Encode an indexed PNG (color type 3) from palette and indices.
fn encode_png_indexed(
    buffer: &PixelBuffer,
    palette: &[Color],
    indices: &[u8],
) -> HeatMapResult<Vec<u8>> {
    let mut png = start_png(buffer, COLOR_TYPE_INDEXED)?;

    let plte: Vec<u8> = palette.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    write_chunk(&mut png, b"PLTE", &plte);

    // tRNS only if any entry is not fully opaque
    if palette.iter().any(|c| c.a < 255) {
        let trns: Vec<u8> = palette.iter().map(|c| c.a).collect();
        write_chunk(&mut png, b"tRNS", &trns);
    }

    let idat = deflate_scanlines(indices, buffer.width(), buffer.height())?;
    write_chunk(&mut png, b"IDAT", &idat);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Signature plus IHDR chunk.
///
/// PNG requires both dimensions in `1..=2^31 - 1`.
fn start_png(buffer: &PixelBuffer, color_type: u8) -> HeatMapResult<Vec<u8>> {
    let unencodable = || HeatMapError::UnencodableImage {
        width: buffer.width(),
        height: buffer.height(),
    };
    let width = png_dimension(buffer.width()).ok_or_else(unencodable)?;
    let height = png_dimension(buffer.height()).ok_or_else(unencodable)?;

    let mut png = Vec::new();
    png.extend_from_slice(&PNG_SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(color_type);
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    Ok(png)
}

fn png_dimension(pixels: usize) -> Option<u32> {
    u32::try_from(pixels)
        .ok()
        .filter(|&n| (1..=MAX_PNG_DIMENSION).contains(&n))
}

/// Build a palette of at most 256 colors, or `None` if there are more.
fn extract_palette(buffer: &PixelBuffer) -> Option<(Vec<Color>, Vec<u8>)> {
    let mut lookup: HashMap<Color, u8> = HashMap::with_capacity(MAX_PALETTE_SIZE);
    let mut palette: Vec<Color> = Vec::with_capacity(MAX_PALETTE_SIZE);
    let mut indices: Vec<u8> = Vec::with_capacity(buffer.width() * buffer.height());

    for color in buffer.colors() {
        let index = match lookup.get(&color) {
            Some(&idx) => idx,
            None => {
                if palette.len() >= MAX_PALETTE_SIZE {
                    return None;
                }
                let idx = palette.len() as u8;
                palette.push(color);
                lookup.insert(color, idx);
                idx
            }
        };
        indices.push(index);
    }

    Some((palette, indices))
}

/// Prefix every scanline with filter type 0 (none) and zlib-compress.
fn deflate_scanlines(data: &[u8], row_len: usize, rows: usize) -> std::io::Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(rows * (1 + row_len));
    for row in data.chunks_exact(row_len.max(1)).take(rows) {
        raw.push(0);
        raw.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::fast());
    encoder.write_all(&raw)?;
    encoder.finish()
}

/// Append a length-prefixed, CRC-suffixed PNG chunk.
fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::greyscale;

    fn striped_buffer(colors: usize) -> PixelBuffer {
        let heatmap = HeatMap::new(
            colors,
            1,
            (0..colors)
                .map(|i| vec![i as f32 / (colors - 1).max(1) as f32])
                .collect(),
        )
        .unwrap();
        rasterize(&heatmap, 1, &greyscale).unwrap()
    }

    #[test]
    fn test_extract_palette_simple() {
        let buffer = striped_buffer(3);
        let (palette, indices) = extract_palette(&buffer).unwrap();

        assert_eq!(palette.len(), 3);
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(palette[0], Color::BLACK);
        assert_eq!(palette[2], Color::WHITE);
    }

    #[test]
    fn test_extract_palette_greyscale_fits() {
        // Every greyscale level is a distinct color, 256 in total.
        let buffer = striped_buffer(256);
        let (palette, _) = extract_palette(&buffer).unwrap();
        assert_eq!(palette.len(), 256);
    }

    #[test]
    fn test_extract_palette_too_many_colors() {
        let heatmap = HeatMap::new(
            300,
            1,
            (0..300).map(|i| vec![i as f32 / 299.0]).collect(),
        )
        .unwrap();
        // Recover the column index so every pixel gets its own color.
        let buffer = rasterize(&heatmap, 1, &|v: f32| -> HeatMapResult<Color> {
            let i = (v * 299.0).round() as u16;
            Ok(Color::opaque((i % 256) as u8, (i / 256) as u8, 7))
        })
        .unwrap();

        assert!(extract_palette(&buffer).is_none());
    }

    #[test]
    fn test_encode_empty_buffer_rejected() {
        for buffer in [PixelBuffer::new(0, 5), PixelBuffer::new(4, 0)] {
            let err = encode_png(&buffer).unwrap_err();
            assert!(matches!(err, HeatMapError::UnencodableImage { .. }));
            assert!(err.is_validation());
            assert!(encode_png_rgba(&buffer).is_err());
        }
    }

    #[test]
    fn test_encode_oversized_buffer_reports_pixel_dimensions() {
        // Zero height keeps the allocation empty.
        let buffer = PixelBuffer::new(1 << 31, 0);
        let err = encode_png(&buffer).unwrap_err();

        assert!(matches!(
            err,
            HeatMapError::UnencodableImage { width, height: 0 } if width == 1 << 31
        ));
        let message = err.to_string();
        assert!(message.contains("2147483648x0"));
        assert!(!message.contains("block size"));
    }

    #[test]
    fn test_png_dimension_limits() {
        assert_eq!(png_dimension(0), None);
        assert_eq!(png_dimension(1), Some(1));
        assert_eq!(png_dimension(i32::MAX as usize), Some(MAX_PNG_DIMENSION));
        assert_eq!(png_dimension(i32::MAX as usize + 1), None);
    }

    #[test]
    fn test_write_chunk_layout() {
        let mut png = Vec::new();
        write_chunk(&mut png, b"IEND", &[]);

        assert_eq!(&png[0..4], &[0, 0, 0, 0]);
        assert_eq!(&png[4..8], b"IEND");
        // Well-known CRC of an empty IEND chunk
        assert_eq!(&png[8..12], &[0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn test_png_path_appends_extension() {
        assert_eq!(png_path(Path::new("scores")), PathBuf::from("scores.png"));
        assert_eq!(
            png_path(Path::new("out/scores.v2")),
            PathBuf::from("out/scores.v2.png")
        );
    }
}
