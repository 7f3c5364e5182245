//! Common test fixtures for heat map tests.
//!
//! Column-major data (`[col][row]`) for small heat maps whose transforms
//! have known results.

/// The 3x2 heat map used throughout the transform tests.
pub fn sample_3x2() -> Vec<Vec<f32>> {
    vec![vec![0.1, 0.3], vec![0.0, 0.2], vec![0.01, 0.5]]
}

/// Per-column maxima of [`sample_3x2`].
pub fn sample_3x2_max_by_column() -> Vec<Vec<f32>> {
    vec![vec![0.0, 1.0], vec![0.0, 1.0], vec![0.0, 1.0]]
}

/// Per-row maxima of [`sample_3x2`].
pub fn sample_3x2_max_by_row() -> Vec<Vec<f32>> {
    vec![vec![1.0, 0.0], vec![0.0, 0.0], vec![0.0, 1.0]]
}

/// Two 3x2 heat maps and their cell-wise average.
pub mod average {
    pub fn first() -> Vec<Vec<f32>> {
        vec![vec![0.1, 0.3], vec![0.0, 0.2], vec![1.0, 0.5]]
    }

    pub fn second() -> Vec<Vec<f32>> {
        vec![vec![0.3, 0.3], vec![0.0, 0.0], vec![0.0, 0.1]]
    }

    pub fn expected() -> Vec<Vec<f32>> {
        vec![vec![0.2, 0.3], vec![0.0, 0.1], vec![0.5, 0.3]]
    }
}

/// Reference colors as RGBA arrays.
pub mod colors {
    pub const BLACK: [u8; 4] = [0, 0, 0, 255];
    pub const WHITE: [u8; 4] = [255, 255, 255, 255];
    pub const RED: [u8; 4] = [255, 0, 0, 255];
    pub const BLUE: [u8; 4] = [0, 0, 255, 255];
}
