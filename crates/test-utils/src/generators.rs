//! Score grid generators for creating synthetic heat map data.
//!
//! Every generator returns `width` columns of `height` scores in `[0, 1]`,
//! indexed `data[col][row]`, ready for `HeatMap::new`.

/// Creates a grid where every cell holds `value`.
pub fn create_constant_grid(width: usize, height: usize, value: f32) -> Vec<Vec<f32>> {
    vec![vec![value; height]; width]
}

/// Creates a grid rising linearly from 0 at the bottom-left cell to 1 at
/// the top-right cell.
///
/// # Example
///
/// ```
/// use test_utils::create_gradient_grid;
///
/// let grid = create_gradient_grid(3, 2);
/// assert_eq!(grid.len(), 3);
/// assert_eq!(grid[0][0], 0.0);
/// assert_eq!(grid[2][1], 1.0);
/// ```
pub fn create_gradient_grid(width: usize, height: usize) -> Vec<Vec<f32>> {
    let steps = (width + height).saturating_sub(2).max(1) as f32;
    (0..width)
        .map(|col| {
            (0..height)
                .map(|row| (col + row) as f32 / steps)
                .collect()
        })
        .collect()
}

/// Creates a grid whose scores encode their position.
///
/// Cell `(col, row)` holds `(col * height + row) / (width * height - 1)`,
/// so every cell is distinct and the position can be recovered from the
/// score. A 1x1 grid holds 0.
pub fn create_indexed_grid(width: usize, height: usize) -> Vec<Vec<f32>> {
    let last = (width * height).saturating_sub(1).max(1) as f32;
    (0..width)
        .map(|col| {
            (0..height)
                .map(|row| (col * height + row) as f32 / last)
                .collect()
        })
        .collect()
}

/// Creates a 0/1 checkerboard with cell `(0, 0)` set to 1.
pub fn create_checkerboard_grid(width: usize, height: usize) -> Vec<Vec<f32>> {
    (0..width)
        .map(|col| {
            (0..height)
                .map(|row| if (col + row) % 2 == 0 { 1.0 } else { 0.0 })
                .collect()
        })
        .collect()
}

/// Creates a grid with random-ish but deterministic scores.
///
/// Uses a simple hash-based approach for reproducibility.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
/// * `seed` - Seed value for deterministic generation
pub fn create_random_grid(width: usize, height: usize, seed: u64) -> Vec<Vec<f32>> {
    (0..width)
        .map(|col| {
            (0..height)
                .map(|row| {
                    let mut h = seed ^ ((col as u64) << 32) ^ row as u64;
                    h = h.wrapping_mul(0x9E37_79B9_7F4A_7C15);
                    h ^= h >> 29;
                    h = h.wrapping_mul(0xBF58_476D_1CE4_E5B9);
                    h ^= h >> 32;
                    (h % 10_001) as f32 / 10_000.0
                })
                .collect()
        })
        .collect()
}
