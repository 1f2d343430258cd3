//! Geometry primitives shared by the contour engine and the scene layer.

use serde::{Deserialize, Serialize};
use terravis_gridfloat::GeodesicCellSize;

/// A point in the renderer's 3D coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// An RGB color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const BLUE: Rgb = Rgb::new(0.0, 0.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);
}

/// One contour line segment, the output unit of the extraction engine.
///
/// Segments are produced, not retained; the caller owns the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point3,
    pub end: Point3,
    pub color: Rgb,
}

/// Placement of grid cells in the renderer's coordinate space.
///
/// The grid is centered on the origin; `cell_width`/`cell_height` are in
/// display units, and `depth_scale` converts meters of elevation into
/// display-space depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    /// East-west extent of one cell in display units.
    pub cell_width: f64,
    /// North-south extent of one cell in display units.
    pub cell_height: f64,
    /// Display units per meter of elevation.
    pub depth_scale: f64,
}

impl GridLayout {
    /// Fit a grid into a square display region of side `grid_scale`.
    ///
    /// The dimension that would overflow the region constrains the cell
    /// size; the other follows from the metric anisotropy ratio, so cells
    /// keep their real-world proportions. Grids with extreme aspect
    /// ratios have not been exercised against this selection rule.
    pub fn fit(
        num_columns: u32,
        num_rows: u32,
        cell_size: &GeodesicCellSize,
        grid_scale: f64,
    ) -> Self {
        let (cell_width, cell_height) = if num_rows as f64 * cell_size.ratio > num_columns as f64 {
            let cell_height = grid_scale / num_rows as f64;
            (cell_height / cell_size.ratio, cell_height)
        } else {
            let cell_width = grid_scale / num_columns as f64;
            (cell_width, cell_width * cell_size.ratio)
        };

        Self {
            cell_width,
            cell_height,
            depth_scale: cell_width / cell_size.cell_size_x,
        }
    }

    /// Total display width of a grid with `num_columns` columns.
    pub fn grid_width(&self, num_columns: u32) -> f64 {
        self.cell_width * num_columns as f64
    }

    /// Total display height of a grid with `num_rows` rows.
    pub fn grid_height(&self, num_rows: u32) -> f64 {
        self.cell_height * num_rows as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cell_size(x: f64, y: f64) -> GeodesicCellSize {
        GeodesicCellSize {
            cell_size_x: x,
            cell_size_y: y,
            ratio: y / x,
        }
    }

    #[test]
    fn test_fit_width_constrained() {
        // Square cells, wide grid: columns constrain.
        let layout = GridLayout::fit(200, 100, &cell_size(30.0, 30.0), 20.0);
        assert_relative_eq!(layout.cell_width, 0.1);
        assert_relative_eq!(layout.cell_height, 0.1);
        assert_relative_eq!(layout.grid_width(200), 20.0);
        assert_relative_eq!(layout.grid_height(100), 10.0);
    }

    #[test]
    fn test_fit_height_constrained() {
        // Tall grid: rows constrain, width follows the ratio.
        let layout = GridLayout::fit(100, 200, &cell_size(30.0, 30.0), 20.0);
        assert_relative_eq!(layout.cell_height, 0.1);
        assert_relative_eq!(layout.cell_width, 0.1);
        assert_relative_eq!(layout.grid_height(200), 20.0);
    }

    #[test]
    fn test_fit_anisotropic_cells() {
        // Cells twice as tall as wide tip a square grid into the
        // height-constrained branch.
        let layout = GridLayout::fit(100, 100, &cell_size(15.0, 30.0), 20.0);
        assert_relative_eq!(layout.cell_height, 0.2);
        assert_relative_eq!(layout.cell_width, 0.1);
    }

    #[test]
    fn test_depth_scale_tracks_cell_width() {
        let layout = GridLayout::fit(100, 100, &cell_size(25.0, 25.0), 20.0);
        // 0.2 display units per cell over 25 m cells.
        assert_relative_eq!(layout.depth_scale, 0.2 / 25.0);
    }
}
