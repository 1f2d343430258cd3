//! Contour level selection.

use crate::ContourError;
use serde::{Deserialize, Serialize};

/// A request for a set of evenly spaced contour levels.
///
/// `stride` is the sampling stride over the grid: only every `stride`-th
/// row and column boundary is treated as a cell edge, which lets very
/// large grids be contoured at reduced resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContourRequest {
    /// Number of contour levels to extract.
    pub level_count: u32,
    /// Elevation of the lowest contour.
    pub low_value: f64,
    /// Elevation bound of the highest contour.
    pub high_value: f64,
    /// Sampling stride over the grid; at least 1.
    pub stride: u32,
}

impl ContourRequest {
    /// Create a request, rejecting a zero stride.
    pub fn new(level_count: u32, low_value: f64, high_value: f64, stride: u32) -> Result<Self, ContourError> {
        if stride == 0 {
            return Err(ContourError::InvalidStride);
        }
        Ok(Self {
            level_count,
            low_value,
            high_value,
            stride,
        })
    }

    /// Elevation spacing between consecutive levels.
    ///
    /// Undefined (non-finite) when `level_count` is zero; callers iterate
    /// [`ContourRequest::levels`], which is empty in that case, so the
    /// value is never consumed.
    pub fn step_size(&self) -> f64 {
        (self.high_value - self.low_value) / self.level_count as f64
    }

    /// The requested elevation levels, lowest first.
    pub fn levels(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.step_size();
        (0..self.level_count).map(move |i| self.low_value + i as f64 * step)
    }
}
