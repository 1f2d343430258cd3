//! Export and summary types for the CLI.

use serde::Serialize;
use std::fmt;
use terravis_contour::{ContourRequest, Segment};
use terravis_gridfloat::GridFloatDataset;
use terravis_scene::MeshVertex;

/// Human- and machine-readable summary of a loaded dataset.
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub columns: u32,
    pub rows: u32,
    pub cell_size_x_m: f64,
    pub cell_size_y_m: f64,
    pub cell_size_ratio: f64,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_long: f64,
    pub max_long: f64,
    pub min_height: f64,
    pub max_height: f64,
    pub avg_height: f64,
    pub num_cells: u32,
    pub num_empty_cells: u32,
    /// (row, column) of the first minimum occurrence.
    pub min_height_at: (u32, u32),
    /// (row, column) of the first maximum occurrence.
    pub max_height_at: (u32, u32),
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &GridFloatDataset) -> Self {
        let bounds = dataset.header.bounds();
        let stats = dataset.grid.stats();
        Self {
            columns: dataset.header.num_columns,
            rows: dataset.header.num_rows,
            cell_size_x_m: dataset.cell_size.cell_size_x,
            cell_size_y_m: dataset.cell_size.cell_size_y,
            cell_size_ratio: dataset.cell_size.ratio,
            min_lat: bounds.min_lat,
            max_lat: bounds.max_lat,
            min_long: bounds.min_long,
            max_long: bounds.max_long,
            min_height: stats.min_height,
            max_height: stats.max_height,
            avg_height: stats.avg_height,
            num_cells: stats.num_cells,
            num_empty_cells: stats.num_empty_cells,
            min_height_at: (stats.min_height_row, stats.min_height_col),
            max_height_at: (stats.max_height_row, stats.max_height_col),
        }
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} columns x {} rows", self.columns, self.rows)?;
        writeln!(
            f,
            "Cell size: {:.2} m x {:.2} m (ratio {:.4})",
            self.cell_size_x_m, self.cell_size_y_m, self.cell_size_ratio
        )?;
        writeln!(
            f,
            "{:.4}\u{b0} to {:.4}\u{b0} latitude",
            self.min_lat, self.max_lat
        )?;
        writeln!(
            f,
            "{:.4}\u{b0} to {:.4}\u{b0} longitude",
            self.min_long, self.max_long
        )?;
        writeln!(
            f,
            "Height: min {:.2} m at {:?}, max {:.2} m at {:?}, avg {:.2} m",
            self.min_height, self.min_height_at, self.max_height, self.max_height_at,
            self.avg_height
        )?;
        write!(
            f,
            "{} cells with data, {} empty",
            self.num_cells, self.num_empty_cells
        )
    }
}

/// JSON export of one contour extraction.
#[derive(Debug, Serialize)]
pub struct ContourExport {
    pub request: ContourRequest,
    pub segment_count: usize,
    pub segments: Vec<Segment>,
}

/// JSON export of the mesh vertex strips and the peak marker.
#[derive(Debug, Serialize)]
pub struct MeshExport {
    pub stride: u32,
    pub strip_count: usize,
    pub vertex_count: usize,
    pub strips: Vec<Vec<MeshVertex>>,
    pub marker: MeshVertex,
}
