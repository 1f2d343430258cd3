//! Binary grid decoding and elevation statistics.

use crate::{ByteOrder, GridFloatError, RasterHeader, Result};
use std::io::Read;
use std::path::Path;

/// Summary statistics gathered while decoding a grid.
///
/// Minimum and maximum are tracked with strict comparisons, so ties keep
/// the first occurrence in row-major scan order. The mean covers only
/// cells that hold a valid sample; no-data cells are counted separately
/// but still participate in min/max, matching the format's historical
/// statistics contract.
#[derive(Debug, Clone, Copy)]
pub struct GridStats {
    /// Lowest stored value.
    pub min_height: f64,
    /// Highest stored value.
    pub max_height: f64,
    /// Mean over cells that are not the no-data sentinel.
    pub avg_height: f64,
    /// Number of cells holding a valid sample.
    pub num_cells: u32,
    /// Number of cells equal to the no-data sentinel.
    pub num_empty_cells: u32,
    /// Row of the first minimum occurrence.
    pub min_height_row: u32,
    /// Column of the first minimum occurrence.
    pub min_height_col: u32,
    /// Row of the first maximum occurrence.
    pub max_height_row: u32,
    /// Column of the first maximum occurrence.
    pub max_height_col: u32,
}

/// A decoded elevation grid.
///
/// Samples are stored row-major with row 0 as the northernmost row, the
/// order in which the `.flt` file lays them out. The grid is immutable
/// once decoded; a new load replaces it wholesale.
#[derive(Debug, Clone)]
pub struct ElevationGrid {
    /// Elevation samples in row-major order (north to south).
    data: Vec<f32>,
    /// Width of the grid in samples.
    num_columns: u32,
    /// Height of the grid in samples.
    num_rows: u32,
    /// No-data sentinel from the header.
    no_data: i32,
    /// Statistics gathered during the decode pass.
    stats: GridStats,
}

impl ElevationGrid {
    /// Decode a binary grid in the header's declared byte order.
    ///
    /// Reads exactly `rows * columns` 4-byte IEEE-754 records; trailing
    /// bytes beyond that are ignored. Statistics are accumulated in the
    /// same single pass as reading. `path` is used only for error context.
    pub fn decode<R: Read>(header: &RasterHeader, mut reader: R, path: &Path) -> Result<Self> {
        let expected_bytes = header.expected_data_bytes();
        let mut raw = Vec::with_capacity(expected_bytes);
        reader
            .by_ref()
            .take(expected_bytes as u64)
            .read_to_end(&mut raw)?;
        if raw.len() < expected_bytes {
            return Err(GridFloatError::TruncatedData {
                path: path.to_path_buf(),
                expected_bytes,
                actual_bytes: raw.len(),
            });
        }

        let num_columns = header.num_columns;
        let num_rows = header.num_rows;
        let no_data = header.no_data;
        let sentinel = no_data as f32;

        let mut data = Vec::with_capacity(num_rows as usize * num_columns as usize);
        let mut min_height = f64::INFINITY;
        let mut max_height = f64::NEG_INFINITY;
        let mut sum = 0.0_f64;
        let mut num_cells = 0u32;
        let mut num_empty_cells = 0u32;
        let mut min_height_row = 0u32;
        let mut min_height_col = 0u32;
        let mut max_height_row = 0u32;
        let mut max_height_col = 0u32;

        for (idx, record) in raw.chunks_exact(4).enumerate() {
            let bits = [record[0], record[1], record[2], record[3]];
            let value = match header.byte_order {
                ByteOrder::BigEndian => f32::from_be_bytes(bits),
                ByteOrder::LittleEndian => f32::from_le_bytes(bits),
            };
            let row = (idx / num_columns as usize) as u32;
            let col = (idx % num_columns as usize) as u32;

            if value == sentinel {
                num_empty_cells += 1;
            } else {
                sum += value as f64;
                num_cells += 1;
            }
            if (value as f64) > max_height {
                max_height = value as f64;
                max_height_row = row;
                max_height_col = col;
            }
            if (value as f64) < min_height {
                min_height = value as f64;
                min_height_row = row;
                min_height_col = col;
            }
            data.push(value);
        }

        if num_cells == 0 {
            return Err(GridFloatError::DegenerateGrid(format!(
                "every cell in {} equals the no-data sentinel {no_data}",
                path.display()
            )));
        }

        Ok(Self {
            data,
            num_columns,
            num_rows,
            no_data,
            stats: GridStats {
                min_height,
                max_height,
                avg_height: sum / num_cells as f64,
                num_cells,
                num_empty_cells,
                min_height_row,
                min_height_col,
                max_height_row,
                max_height_col,
            },
        })
    }

    /// Sample at a grid position. Row 0 is the northernmost row.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn value(&self, row: u32, col: u32) -> f32 {
        assert!(row < self.num_rows && col < self.num_columns);
        self.data[(row * self.num_columns + col) as usize]
    }

    /// Bounds-checked sample access.
    pub fn get(&self, row: u32, col: u32) -> Option<f32> {
        if row < self.num_rows && col < self.num_columns {
            Some(self.data[(row * self.num_columns + col) as usize])
        } else {
            None
        }
    }

    /// Whether the sample at a grid position is the no-data sentinel.
    pub fn is_empty_cell(&self, row: u32, col: u32) -> bool {
        self.value(row, col) == self.no_data as f32
    }

    /// Width of the grid in samples.
    pub fn num_columns(&self) -> u32 {
        self.num_columns
    }

    /// Height of the grid in samples.
    pub fn num_rows(&self) -> u32 {
        self.num_rows
    }

    /// The integer no-data sentinel.
    pub fn no_data(&self) -> i32 {
        self.no_data
    }

    /// Statistics from the decode pass.
    pub fn stats(&self) -> &GridStats {
        &self.stats
    }

    /// Raw row-major samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }
}
