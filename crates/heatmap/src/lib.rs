//! Block heat map rendering for grids of normalized scores.
//!
//! Provides:
//! - [`HeatMap`]: validated `width x height` grid of scores in `[0, 1]`
//! - Grid transforms: transpose, per-column / per-row maximum masks, averaging
//! - Color mappers (greyscale, red/blue diverging, or any closure)
//! - Block rasterization with row 0 at the bottom of the image
//! - PNG output

pub mod color;
pub mod error;
pub mod grid;
pub mod options;
pub mod png;
pub mod raster;

pub use color::{greyscale, red_blue, Color, ColorMapper, ColorScale};
pub use error::{HeatMapError, HeatMapResult};
pub use grid::{average, reduce_to_max, HeatMap};
pub use options::RenderOptions;
pub use png::{encode_png, render_to_file, render_with_sink, ImageSink, PngFile};
pub use raster::{block_rect, rasterize, BlockRect, PixelBuffer};
