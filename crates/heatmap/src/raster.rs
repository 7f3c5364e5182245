//! Block rasterization of heat maps into RGBA pixel buffers.
//!
//! Each heat map cell becomes a `block_size x block_size` square of one
//! color. Pixel buffers are addressed top-down while heat map rows count
//! upwards, so row 0 lands on the bottom edge of the image.

use std::ops::Range;

use crate::color::{Color, ColorMapper};
use crate::error::{HeatMapError, HeatMapResult};
use crate::grid::HeatMap;

/// RGBA pixel data, row-major with the top row first (4 bytes per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelBuffer {
    /// A fully transparent buffer. Callers size it through
    /// [`image_dimensions`] first.
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The pixel at column `x`, row `y` (row 0 is the top of the image).
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let p = &self.pixels[idx..idx + 4];
        Some(Color::new(p[0], p[1], p[2], p[3]))
    }

    /// Iterate over every pixel, top row first.
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.pixels
            .chunks_exact(4)
            .map(|p| Color::new(p[0], p[1], p[2], p[3]))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// Paint a rectangle, clipped to the buffer.
    fn fill(&mut self, rect: &BlockRect, color: Color) {
        let rgba = color.to_array();
        let x_end = rect.x.end.min(self.width);
        let y_end = rect.y.end.min(self.height);
        if rect.x.start >= x_end {
            return;
        }

        for y in rect.y.start..y_end {
            let row_start = (y * self.width + rect.x.start) * 4;
            let row_end = (y * self.width + x_end) * 4;
            for pixel in self.pixels[row_start..row_end].chunks_exact_mut(4) {
                pixel.copy_from_slice(&rgba);
            }
        }
    }
}

/// The pixel rectangle covered by one heat map cell (half-open ranges).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRect {
    pub x: Range<usize>,
    pub y: Range<usize>,
}

/// Map heat map cell `(column, row)` to its pixel rectangle.
///
/// `height` is the heat map height in cells. The vertical axis is flipped:
/// row `j` covers pixel rows `[(height - j - 1) * block_size, (height - j) * block_size)`,
/// putting row 0 at the bottom of the image.
///
/// Returns `None` if `row` is not below `height` or a pixel coordinate
/// overflows `usize`.
pub fn block_rect(
    column: usize,
    row: usize,
    height: usize,
    block_size: usize,
) -> Option<BlockRect> {
    let flipped = height.checked_sub(row)?.checked_sub(1)?;
    let x_start = column.checked_mul(block_size)?;
    let y_start = flipped.checked_mul(block_size)?;

    Some(BlockRect {
        x: x_start..x_start.checked_add(block_size)?,
        y: y_start..y_start.checked_add(block_size)?,
    })
}

/// Pixel dimensions of a heat map rendered at `block_size`.
pub fn image_dimensions(heatmap: &HeatMap, block_size: usize) -> HeatMapResult<(usize, usize)> {
    if block_size < 1 {
        return Err(HeatMapError::InvalidBlockSize(block_size));
    }

    let too_large = || HeatMapError::ImageTooLarge {
        width: heatmap.width(),
        height: heatmap.height(),
        block_size,
    };

    let width = heatmap.width().checked_mul(block_size).ok_or_else(too_large)?;
    let height = heatmap.height().checked_mul(block_size).ok_or_else(too_large)?;
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(too_large)?;

    Ok((width, height))
}

/// Render a heat map into a pixel buffer.
///
/// # Arguments
/// - `heatmap`: Scores to render
/// - `block_size`: Side length in pixels of each cell's square
/// - `mapper`: Converts each score to a color
///
/// # Errors
/// [`HeatMapError::InvalidBlockSize`] for a zero block size,
/// [`HeatMapError::ImageTooLarge`] if the pixel count overflows, or the
/// first error returned by `mapper`. No buffer is returned on error.
pub fn rasterize<M>(
    heatmap: &HeatMap,
    block_size: usize,
    mapper: &M,
) -> HeatMapResult<PixelBuffer>
where
    M: ColorMapper + ?Sized,
{
    let (width, height) = image_dimensions(heatmap, block_size)?;

    tracing::debug!(
        columns = heatmap.width(),
        rows = heatmap.height(),
        block_size,
        width,
        height,
        "Rasterizing heat map"
    );

    let mut buffer = PixelBuffer::new(width, height);

    for (i, column) in heatmap.data().iter().enumerate() {
        for (j, &score) in column.iter().enumerate() {
            let color = mapper.map(score)?;
            let rect = block_rect(i, j, heatmap.height(), block_size).ok_or_else(|| {
                HeatMapError::ImageTooLarge {
                    width: heatmap.width(),
                    height: heatmap.height(),
                    block_size,
                }
            })?;
            buffer.fill(&rect, color);
        }
    }

    Ok(buffer)
}
