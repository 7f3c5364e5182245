//! Color mapping from normalized scores to RGBA colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HeatMapError, HeatMapResult};

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::opaque(0, 0, 0);
    pub const WHITE: Color = Color::opaque(255, 255, 255);
    pub const RED: Color = Color::opaque(255, 0, 0);
    pub const BLUE: Color = Color::opaque(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// A fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Translates a heat map score into a color.
///
/// Implemented for the named [`ColorScale`]s and for any closure
/// `Fn(f32) -> HeatMapResult<Color>`, so callers can pass their own.
pub trait ColorMapper {
    fn map(&self, value: f32) -> HeatMapResult<Color>;
}

impl<F> ColorMapper for F
where
    F: Fn(f32) -> HeatMapResult<Color>,
{
    fn map(&self, value: f32) -> HeatMapResult<Color> {
        self(value)
    }
}

/// Reject anything a byte conversion would have to clamp.
fn check_unit(value: f32) -> HeatMapResult<f32> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(HeatMapError::ValueOutOfRange { value })
    }
}

/// Round a channel value already known to lie in `[0, 255]`.
fn channel(v: f32) -> u8 {
    v.round() as u8
}

/// Convert a score in `[0, 1]` to a grey between black (`0`) and white (`1`).
pub fn greyscale(value: f32) -> HeatMapResult<Color> {
    let v = channel(check_unit(value)? * 255.0);
    Ok(Color::opaque(v, v, v))
}

/// Convert a score in `[0, 1]` to a red/blue diverging color.
///
/// Scores up to and including 0.5 are red, fading from full red at 0 to
/// black at 0.5. Scores above 0.5 are blue, rising from black to full blue
/// at 1.
pub fn red_blue(value: f32) -> HeatMapResult<Color> {
    let value = check_unit(value)?;

    if value <= 0.5 {
        Ok(Color::opaque(channel(255.0 - value * 510.0), 0, 0))
    } else {
        Ok(Color::opaque(0, 0, channel(value * 510.0 - 255.0)))
    }
}

/// Named color scales selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    #[default]
    Greyscale,
    RedBlue,
}

impl ColorScale {
    pub const ALL: [ColorScale; 2] = [ColorScale::Greyscale, ColorScale::RedBlue];

    pub fn name(&self) -> &'static str {
        match self {
            ColorScale::Greyscale => "greyscale",
            ColorScale::RedBlue => "red_blue",
        }
    }
}

impl ColorMapper for ColorScale {
    fn map(&self, value: f32) -> HeatMapResult<Color> {
        match self {
            ColorScale::Greyscale => greyscale(value),
            ColorScale::RedBlue => red_blue(value),
        }
    }
}

impl fmt::Display for ColorScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScale {
    type Err = HeatMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "greyscale" | "grayscale" | "grey" | "gray" => Ok(ColorScale::Greyscale),
            "red_blue" | "redblue" => Ok(ColorScale::RedBlue),
            other => Err(HeatMapError::Config(format!("unknown color scale '{}'", other))),
        }
    }
}
