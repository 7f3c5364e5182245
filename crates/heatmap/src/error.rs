//! Error types for heat map construction, transforms and rendering.

use thiserror::Error;

/// Result type alias using HeatMapError.
pub type HeatMapResult<T> = Result<T, HeatMapError>;

/// Errors returned by heat map operations.
///
/// Every error is terminal for the call that produced it: no partially
/// built heat map, pixel buffer or image file is ever handed back.
#[derive(Debug, Error)]
pub enum HeatMapError {
    // === Construction Errors ===
    #[error("dimensions must all be greater or equal to 1, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("data violates specified x dimension: expected {expected} columns, got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error(
        "data violates specified y dimension: column {column} has {actual} values, \
         expected {expected}"
    )]
    ColumnCountMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("value {value} is outside the range [0, 1]")]
    ValueOutOfRange { value: f32 },

    // === Averaging Errors ===
    #[error("no heat maps provided")]
    NoInput,

    #[error(
        "heat map {index} is {}x{}, previous heat map is {}x{}",
        actual.0,
        actual.1,
        expected.0,
        expected.1
    )]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    // === Rendering Errors ===
    #[error("block size must be positive, got {0}")]
    InvalidBlockSize(usize),

    #[error("image dimensions {width}x{height} with block size {block_size} are too large")]
    ImageTooLarge {
        width: usize,
        height: usize,
        block_size: usize,
    },

    #[error("image dimensions {width}x{height} cannot be encoded as PNG")]
    UnencodableImage { width: usize, height: usize },

    #[error("heat map filename cannot be blank")]
    EmptyName,

    #[error("invalid render options: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HeatMapError {
    /// Whether the error was caused by invalid input rather than by the
    /// environment (file system, encoder).
    pub fn is_validation(&self) -> bool {
        !matches!(self, HeatMapError::Io(_))
    }
}

impl From<serde_json::Error> for HeatMapError {
    fn from(err: serde_json::Error) -> Self {
        HeatMapError::Config(format!("JSON error: {}", err))
    }
}
