//! Mesh vertex stream for the terrain surface.

use crate::color::elevation_to_color;
use serde::{Deserialize, Serialize};
use terravis_contour::{GridLayout, Point3, Rgb};
use terravis_gridfloat::ElevationGrid;

/// One mesh vertex: a display-space position plus a ramp color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshVertex {
    pub position: Point3,
    pub color: Rgb,
}

/// Build triangle-strip vertex columns for the terrain surface.
///
/// One strip per column step: walking south through the grid, each step
/// contributes the vertex at `(x, y)` followed by `(x + stride, y)`, the
/// order a triangle-strip renderer consumes directly. Positions use the
/// same centered placement as the contour engine, with the grid's mean
/// elevation at z = 0, and colors come from the elevation ramp between
/// `low_color` and `high_color`.
///
/// A grid narrower than `stride` produces no strips.
pub fn build_strips(
    grid: &ElevationGrid,
    layout: &GridLayout,
    stride: u32,
    low_color: Rgb,
    high_color: Rgb,
) -> Vec<Vec<MeshVertex>> {
    debug_assert!(stride >= 1);
    let num_columns = grid.num_columns();
    let num_rows = grid.num_rows();
    let stats = grid.stats();
    let origin_x = -layout.grid_width(num_columns) / 2.0;
    let origin_y = -layout.grid_height(num_rows) / 2.0;

    let vertex = |row: u32, col: u32, world_x: f64, world_y: f64| {
        let elevation = grid.value(row, col) as f64;
        MeshVertex {
            position: Point3::new(
                world_x,
                world_y,
                layout.depth_scale * (elevation - stats.avg_height),
            ),
            color: elevation_to_color(
                elevation,
                stats.min_height,
                stats.max_height,
                low_color,
                high_color,
            ),
        }
    };

    let mut strips = Vec::new();
    let mut x = 0;
    while x + stride < num_columns {
        let cell_x = origin_x + x as f64 * layout.cell_width;
        let mut strip = Vec::new();
        let mut y = 0;
        while y < num_rows {
            let cell_y = origin_y + (num_rows - y) as f64 * layout.cell_height;
            strip.push(vertex(y, x, cell_x, cell_y));
            strip.push(vertex(
                y,
                x + stride,
                cell_x + layout.cell_width * stride as f64,
                cell_y,
            ));
            y += stride;
        }
        strips.push(strip);
        x += stride;
    }
    strips
}

/// The highest-point marker: position and color for the grid's maximum.
pub fn peak_marker(grid: &ElevationGrid, layout: &GridLayout, color: Rgb) -> MeshVertex {
    let stats = grid.stats();
    let num_columns = grid.num_columns();
    let num_rows = grid.num_rows();
    MeshVertex {
        position: Point3::new(
            layout.cell_width * stats.max_height_col as f64 - layout.grid_width(num_columns) / 2.0,
            layout.cell_height * (num_rows - 1 - stats.max_height_row) as f64
                - layout.grid_height(num_rows) / 2.0,
            layout.depth_scale * (stats.max_height - stats.avg_height),
        ),
        color,
    }
}
