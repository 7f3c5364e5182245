//! The heat map data model and its derived-grid operations.
//!
//! A [`HeatMap`] is a validated `width x height` grid of scores in `[0, 1]`.
//! Data is stored column-major: `data[i][j]` is column `i` (x), row `j` (y).
//! Row 0 is the bottom of the rendered image.

use std::borrow::Cow;

use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::error::{HeatMapError, HeatMapResult};

/// A validated grid of normalized scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawHeatMap")]
pub struct HeatMap {
    width: usize,
    height: usize,
    data: Vec<Vec<f32>>,
}

/// Unvalidated wire form, routed through [`HeatMap::new`] on deserialize.
#[derive(Deserialize)]
struct RawHeatMap {
    width: usize,
    height: usize,
    data: Vec<Vec<f32>>,
}

impl TryFrom<RawHeatMap> for HeatMap {
    type Error = HeatMapError;

    fn try_from(raw: RawHeatMap) -> HeatMapResult<Self> {
        HeatMap::new(raw.width, raw.height, raw.data)
    }
}

impl HeatMap {
    /// Create a heat map from `width` columns of `height` scores each.
    ///
    /// # Errors
    /// Checks run in this order and the first failure is returned:
    /// - [`HeatMapError::InvalidDimensions`] if either dimension is zero
    /// - [`HeatMapError::RowCountMismatch`] if `data.len() != width`
    /// - [`HeatMapError::ColumnCountMismatch`] if any column length `!= height`
    /// - [`HeatMapError::ValueOutOfRange`] if any score is outside `[0, 1]`
    pub fn new(width: usize, height: usize, data: Vec<Vec<f32>>) -> HeatMapResult<Self> {
        Self::validate(width, height, &data)?;

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Run the constructor's checks without building a heat map.
    pub fn validate(width: usize, height: usize, data: &[Vec<f32>]) -> HeatMapResult<()> {
        if width < 1 || height < 1 {
            return Err(HeatMapError::InvalidDimensions { width, height });
        }

        if data.len() != width {
            return Err(HeatMapError::RowCountMismatch {
                expected: width,
                actual: data.len(),
            });
        }

        // All shapes are checked before any value.
        if let Some((column, values)) = data
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != height)
        {
            return Err(HeatMapError::ColumnCountMismatch {
                column,
                expected: height,
                actual: values.len(),
            });
        }

        // `contains` is false for NaN as well.
        if let Some(&value) = data
            .iter()
            .flatten()
            .find(|value| !(0.0..=1.0).contains(*value))
        {
            return Err(HeatMapError::ValueOutOfRange { value });
        }

        Ok(())
    }

    /// Number of columns (x positions).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows (y positions).
    pub fn height(&self) -> usize {
        self.height
    }

    /// All columns, `data()[i][j]` being column `i`, row `j`.
    pub fn data(&self) -> &[Vec<f32>] {
        &self.data
    }

    /// The scores of column `i`, bottom row first.
    pub fn column(&self, i: usize) -> Option<&[f32]> {
        self.data.get(i).map(Vec::as_slice)
    }

    /// The score at column `i`, row `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f32> {
        self.data.get(i)?.get(j).copied()
    }

    /// Consume the heat map, returning its columns.
    pub fn into_data(self) -> Vec<Vec<f32>> {
        self.data
    }

    /// Returns a new heat map with columns and rows swapped.
    pub fn transpose(&self) -> HeatMap {
        HeatMap {
            width: self.height,
            height: self.width,
            data: transpose(&self.data),
        }
    }

    /// Returns a new heat map where the maximum of each column is set to 1
    /// and every other score to 0. Tied maxima are all set.
    pub fn max_by_column(&self) -> HeatMap {
        HeatMap {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|column| reduce_to_max(column)).collect(),
        }
    }

    /// Returns a new heat map where the maximum of each row is set to 1 and
    /// every other score to 0. Tied maxima are all set.
    pub fn max_by_row(&self) -> HeatMap {
        self.transpose().max_by_column().transpose()
    }
}

/// Swap the outer and inner axes of a rectangular nested vector.
///
/// Callers pass validated heat map storage, so every inner vector has the
/// length of the first one.
pub(crate) fn transpose<T: Copy>(data: &[Vec<T>]) -> Vec<Vec<T>> {
    let inner_len = data.first().map_or(0, Vec::len);

    (0..inner_len)
        .map(|j| data.iter().map(|column| column[j]).collect())
        .collect()
}

/// Returns a slice of the same length that is 1 at every index holding the
/// maximum value and 0 everywhere else.
///
/// All occurrences of the maximum are marked, so a slice of equal values
/// comes back as all ones. An empty slice yields an empty vector.
pub fn reduce_to_max<T>(values: &[T]) -> Vec<T>
where
    T: Copy + PartialOrd + Zero + One,
{
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let max = values
        .iter()
        .copied()
        .fold(first, |max, value| if value > max { value } else { max });

    values
        .iter()
        .map(|&value| if value == max { T::one() } else { T::zero() })
        .collect()
}

/// Average several heat maps cell by cell.
///
/// With a single input the input itself is returned, borrowed and
/// uncopied. With more, each heat map's dimensions are compared against
/// the one before it and the result is the per-cell sum divided by the
/// number of heat maps.
///
/// # Errors
/// - [`HeatMapError::NoInput`] for an empty slice
/// - [`HeatMapError::DimensionMismatch`] for the first heat map whose
///   dimensions differ from its predecessor's
pub fn average(heatmaps: &[HeatMap]) -> HeatMapResult<Cow<'_, HeatMap>> {
    let (first, rest) = match heatmaps {
        [] => return Err(HeatMapError::NoInput),
        [single] => return Ok(Cow::Borrowed(single)),
        [first, rest @ ..] => (first, rest),
    };

    for (index, pair) in heatmaps.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        if previous.width != current.width || previous.height != current.height {
            return Err(HeatMapError::DimensionMismatch {
                index: index + 1,
                expected: (previous.width, previous.height),
                actual: (current.width, current.height),
            });
        }
    }

    tracing::debug!(
        count = heatmaps.len(),
        width = first.width,
        height = first.height,
        "Averaging heat maps"
    );

    let count = heatmaps.len() as f32;
    let mut sums = first.data.clone();
    for heatmap in rest {
        for (sum_column, column) in sums.iter_mut().zip(&heatmap.data) {
            for (sum, value) in sum_column.iter_mut().zip(column) {
                *sum += value;
            }
        }
    }

    let data = sums
        .into_iter()
        .map(|column| column.into_iter().map(|sum| sum / count).collect())
        .collect();

    Ok(Cow::Owned(HeatMap {
        width: first.width,
        height: first.height,
        data,
    }))
}
