//! Per-cell contour extraction.
//!
//! The grid is partitioned into cells of `stride` samples on a side; each
//! cell is classified against each requested level by which corners sit
//! above it, and crossings are placed by linear interpolation along the
//! cell edges. The cell walk is a single pass with no shared mutable
//! state; emission order is row-major over cells, then levels, and is not
//! semantically significant.
//!
//! Cell corner numbering, with row 0 (north) at the top:
//!
//! ```text
//! [0]------------[1]
//!  '              '
//!  '              '
//! [2]------------[3]
//! ```

use crate::{ContourRequest, GridLayout, Point3, Rgb, Segment};
use terravis_gridfloat::ElevationGrid;
use thiserror::Error;

/// Errors that can occur during contour extraction.
#[derive(Debug, Error)]
pub enum ContourError {
    /// The request's sampling stride was zero.
    #[error("Contour stride must be at least 1")]
    InvalidStride,

    /// The grid has no complete cell at the requested stride.
    #[error("{num_columns}x{num_rows} grid has no complete cell at stride {stride}")]
    GridTooSmall {
        /// Grid width in samples.
        num_columns: u32,
        /// Grid height in samples.
        num_rows: u32,
        /// Requested sampling stride.
        stride: u32,
    },
}

/// Extract contour segments for every requested level.
///
/// Cells are placed per `layout` with the grid centered on the origin;
/// each segment's depth is the level's elevation rescaled by the layout's
/// depth scale and offset so the grid's mean elevation sits at z = 0
/// (the companion mesh shares that vertical datum). Every segment gets
/// the caller's `color`.
///
/// Partial cells at the south and east edges are skipped when the stride
/// does not evenly divide the grid dimensions. A grid with no complete
/// cell at all fails with [`ContourError::GridTooSmall`].
pub fn extract(
    grid: &ElevationGrid,
    request: &ContourRequest,
    layout: &GridLayout,
    color: Rgb,
) -> Result<Vec<Segment>, ContourError> {
    let stride = request.stride;
    if stride == 0 {
        return Err(ContourError::InvalidStride);
    }
    let num_columns = grid.num_columns();
    let num_rows = grid.num_rows();
    if num_columns <= stride || num_rows <= stride {
        return Err(ContourError::GridTooSmall {
            num_columns,
            num_rows,
            stride,
        });
    }

    let avg_height = grid.stats().avg_height;
    let origin_x = -layout.grid_width(num_columns) / 2.0;
    let origin_y = -layout.grid_height(num_rows) / 2.0;
    let span_x = layout.cell_width * stride as f64;
    let span_y = layout.cell_height * stride as f64;

    let mut segments = Vec::new();

    let mut x = 0;
    while x + stride < num_columns {
        let cell_x = origin_x + x as f64 * layout.cell_width;
        let mut y = 0;
        while y + stride < num_rows {
            // Cells hang below their top edge: row y maps to the top of
            // the cell, with world Y decreasing southward.
            let cell_y = origin_y + (num_rows - y) as f64 * layout.cell_height;

            let c0 = grid.value(y, x) as f64;
            let c1 = grid.value(y, x + stride) as f64;
            let c2 = grid.value(y + stride, x) as f64;
            let c3 = grid.value(y + stride, x + stride) as f64;

            for level in request.levels() {
                let z = layout.depth_scale * (level - avg_height);
                let above = [c0 > level, c1 > level, c2 > level, c3 > level];

                // Crossing fraction along each edge, measured from the
                // lower-numbered corner. Only evaluated for edges the
                // dispatch below actually crosses, where the corners
                // strictly straddle the level.
                let p01 = || {
                    Point3::new(cell_x + span_x * crossing(c0, c1, level), cell_y, z)
                };
                let p02 = || {
                    Point3::new(cell_x, cell_y - span_y * crossing(c0, c2, level), z)
                };
                let p13 = || {
                    Point3::new(
                        cell_x + span_x,
                        cell_y - span_y * crossing(c1, c3, level),
                        z,
                    )
                };
                let p23 = || {
                    Point3::new(
                        cell_x + span_x * crossing(c2, c3, level),
                        cell_y - span_y,
                        z,
                    )
                };
                let seg = |start: Point3, end: Point3| Segment { start, end, color };

                match above {
                    // Uniform cells contribute nothing.
                    [false, false, false, false] | [true, true, true, true] => {}

                    // One corner in the minority: one segment across the
                    // two edges adjacent to it.
                    [true, false, false, false] | [false, true, true, true] => {
                        segments.push(seg(p02(), p01()));
                    }
                    [false, true, false, false] | [true, false, true, true] => {
                        segments.push(seg(p01(), p13()));
                    }
                    [false, false, true, false] | [true, true, false, true] => {
                        segments.push(seg(p02(), p23()));
                    }
                    [false, false, false, true] | [true, true, true, false] => {
                        segments.push(seg(p23(), p13()));
                    }

                    // Two adjacent corners above: one segment across the
                    // opposite pair of edges.
                    [true, true, false, false] | [false, false, true, true] => {
                        segments.push(seg(p02(), p13()));
                    }
                    [true, false, true, false] | [false, true, false, true] => {
                        segments.push(seg(p01(), p23()));
                    }

                    // Saddle: two diagonally opposite corners above. The
                    // contour is ambiguous; always connect (top, right)
                    // and (left, bottom) so the choice is stable across
                    // the whole grid.
                    [true, false, false, true] | [false, true, true, false] => {
                        segments.push(seg(p01(), p13()));
                        segments.push(seg(p02(), p23()));
                    }
                }
            }
            y += stride;
        }
        x += stride;
    }

    Ok(segments)
}

/// Fraction of the distance from `a` to `b` at which `level` falls.
fn crossing(a: f64, b: f64, level: f64) -> f64 {
    (a - level) / (a - b)
}
