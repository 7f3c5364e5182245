//! Shared test utilities for the heatmap workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Score grid generators
//! - Fixtures reproducing well-known heat maps
//! - Temporary output locations
//! - Approximate float assertions
//!
//! Generators and fixtures return raw column-major `Vec<Vec<f32>>` so this
//! crate does not depend on `heatmap` itself.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                concat!(
                    "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n",
                    "  diff: `{:?}` > epsilon `{:?}`"
                ),
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of two column-major score grids.
///
/// Shapes must match exactly; values within `epsilon`.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_grid_approx_eq;
///
/// assert_grid_approx_eq!(average.data(), expected.data(), 1e-6);
/// ```
#[macro_export]
macro_rules! assert_grid_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: &[Vec<f32>] = $left;
        let right: &[Vec<f32>] = $right;
        assert_eq!(left.len(), right.len(), "grid widths differ");
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            assert_eq!(l.len(), r.len(), "column {} heights differ", i);
            for (a, b) in l.iter().zip(r.iter()) {
                $crate::assert_approx_eq!(*a, *b, $epsilon);
            }
        }
    }};
}
