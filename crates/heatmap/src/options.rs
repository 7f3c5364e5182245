//! Render options loaded from JSON.
//!
//! ```json
//! { "block_size": 20, "color_scale": "red_blue" }
//! ```
//!
//! Missing fields fall back to [`RenderOptions::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::ColorScale;
use crate::error::{HeatMapError, HeatMapResult};
use crate::grid::HeatMap;
use crate::png::render_to_file;
use crate::raster::{rasterize, PixelBuffer};

/// Default side length of a rendered cell, in pixels.
pub const DEFAULT_BLOCK_SIZE: usize = 10;

fn default_block_size() -> usize {
    DEFAULT_BLOCK_SIZE
}

/// How a heat map is turned into an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    #[serde(default = "default_block_size")]
    pub block_size: usize,
    #[serde(default)]
    pub color_scale: ColorScale,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            color_scale: ColorScale::default(),
        }
    }
}

impl RenderOptions {
    pub fn new(block_size: usize, color_scale: ColorScale) -> Self {
        Self {
            block_size,
            color_scale,
        }
    }

    /// Load options from a JSON string and validate them.
    pub fn from_json(json_str: &str) -> HeatMapResult<Self> {
        let options: RenderOptions = serde_json::from_str(json_str)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file and validate them.
    pub fn from_file(path: impl AsRef<Path>) -> HeatMapResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> HeatMapResult<()> {
        if self.block_size < 1 {
            return Err(HeatMapError::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}

impl HeatMap {
    /// Rasterize with the given options.
    pub fn rasterize_with(&self, options: &RenderOptions) -> HeatMapResult<PixelBuffer> {
        rasterize(self, options.block_size, &options.color_scale)
    }

    /// Render to `<name>.png` with the given options.
    pub fn render(
        &self,
        options: &RenderOptions,
        name: impl AsRef<Path>,
    ) -> HeatMapResult<PixelBuffer> {
        render_to_file(self, options.block_size, name, &options.color_scale)
    }
}
