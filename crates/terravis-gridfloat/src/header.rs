//! GridFloat `.hdr` metadata parsing.

use crate::{GridFloatError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Byte order of the 32-bit float records in the binary grid file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Most significant byte first (`MSBFIRST` token).
    BigEndian,
    /// Least significant byte first (any other token).
    LittleEndian,
}

/// Geographic bounding box of a grid in decimal degrees.
#[derive(Debug, Clone, Copy)]
pub struct GridBounds {
    /// Minimum latitude (south edge).
    pub min_lat: f64,
    /// Maximum latitude (north edge).
    pub max_lat: f64,
    /// Minimum longitude (west edge).
    pub min_long: f64,
    /// Maximum longitude (east edge).
    pub max_long: f64,
}

/// Canonical GridFloat header labels, in field order.
///
/// Standard headers carry these labels; when all seven are present the
/// parser assigns fields by label so a reordered file is still read
/// correctly. Files with any unrecognized label fall back to strict
/// positional parsing, which is the historical format contract.
const FIELD_LABELS: [&str; 7] = [
    "ncols",
    "nrows",
    "xllcorner",
    "yllcorner",
    "cellsize",
    "nodata_value",
    "byteorder",
];

/// Parsed GridFloat header metadata.
///
/// The header declares the grid dimensions, the geographic position of the
/// lower-left corner, the (square, in source degrees) cell size, the
/// integer no-data sentinel, and the byte order of the companion `.flt`
/// file. All other values are derived.
#[derive(Debug, Clone)]
pub struct RasterHeader {
    /// Number of columns in the grid. Always positive.
    pub num_columns: u32,
    /// Number of rows in the grid. Always positive.
    pub num_rows: u32,
    /// Longitude of the lower-left corner in decimal degrees.
    pub x_lower_left: f64,
    /// Latitude of the lower-left corner in decimal degrees.
    pub y_lower_left: f64,
    /// Cell size in degrees per cell. Always positive.
    pub cell_size: f64,
    /// Integer sentinel marking cells with no valid sample.
    pub no_data: i32,
    /// Byte order of the binary grid records.
    pub byte_order: ByteOrder,
}

impl RasterHeader {
    /// Read and parse a header file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GridFloatError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parse a header from any buffered source.
    ///
    /// `path` is used only for error context.
    pub fn from_reader<R: Read>(reader: BufReader<R>, path: &Path) -> Result<Self> {
        let malformed = |line: usize, field: &'static str, reason: String| {
            GridFloatError::MalformedHeader {
                path: path.to_path_buf(),
                line,
                field,
                reason,
            }
        };

        // Collect the first seven `<label> <token>` lines.
        let mut entries: Vec<(String, String, usize)> = Vec::with_capacity(7);
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let label = match parts.next() {
                Some(l) => l.to_string(),
                None => continue, // blank line
            };
            let token = parts
                .next()
                .ok_or_else(|| {
                    malformed(
                        idx + 1,
                        FIELD_LABELS[entries.len()],
                        format!("line `{}` has no value token", line.trim()),
                    )
                })?
                .to_string();
            entries.push((label, token, idx + 1));
            if entries.len() == 7 {
                break;
            }
        }
        if entries.len() < 7 {
            return Err(malformed(
                entries.len() + 1,
                FIELD_LABELS[entries.len()],
                format!("header has only {} usable lines, expected 7", entries.len()),
            ));
        }

        // Label-keyed assignment when every line carries a recognized label
        // exactly once; positional order otherwise.
        let mut ordered: [&(String, String, usize); 7] = [
            &entries[0], &entries[1], &entries[2], &entries[3], &entries[4], &entries[5],
            &entries[6],
        ];
        let mut by_label: [Option<&(String, String, usize)>; 7] = [None; 7];
        let mut keyed = true;
        for entry in &entries {
            let lower = entry.0.to_ascii_lowercase();
            match FIELD_LABELS.iter().position(|l| *l == lower) {
                Some(slot) if by_label[slot].is_none() => by_label[slot] = Some(entry),
                _ => {
                    keyed = false;
                    break;
                }
            }
        }
        if keyed {
            for (slot, entry) in by_label.into_iter().enumerate() {
                ordered[slot] = entry.expect("all seven labels matched");
            }
        }

        let parse_u32 = |slot: usize, field: &'static str| -> Result<u32> {
            let (_, token, line) = ordered[slot];
            token
                .parse::<u32>()
                .map_err(|e| malformed(*line, field, format!("`{token}`: {e}")))
        };
        let parse_f64 = |slot: usize, field: &'static str| -> Result<f64> {
            let (_, token, line) = ordered[slot];
            token
                .parse::<f64>()
                .map_err(|e| malformed(*line, field, format!("`{token}`: {e}")))
        };
        let parse_i32 = |slot: usize, field: &'static str| -> Result<i32> {
            let (_, token, line) = ordered[slot];
            token
                .parse::<i32>()
                .map_err(|e| malformed(*line, field, format!("`{token}`: {e}")))
        };

        let num_columns = parse_u32(0, "ncols")?;
        let num_rows = parse_u32(1, "nrows")?;
        let x_lower_left = parse_f64(2, "xllcorner")?;
        let y_lower_left = parse_f64(3, "yllcorner")?;
        let cell_size = parse_f64(4, "cellsize")?;
        let no_data = parse_i32(5, "nodata_value")?;
        // Exactly `MSBFIRST` selects big-endian; any other token is read as
        // little-endian. The permissive fallback matches the format in the
        // wild, where the token is free-form.
        let byte_order = if ordered[6].1 == "MSBFIRST" {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        };

        if num_columns == 0 {
            return Err(malformed(ordered[0].2, "ncols", "must be positive".into()));
        }
        if num_rows == 0 {
            return Err(malformed(ordered[1].2, "nrows", "must be positive".into()));
        }
        if cell_size <= 0.0 {
            return Err(malformed(
                ordered[4].2,
                "cellsize",
                format!("`{}` is not positive", ordered[4].1),
            ));
        }

        Ok(Self {
            num_columns,
            num_rows,
            x_lower_left,
            y_lower_left,
            cell_size,
            no_data,
            byte_order,
        })
    }

    /// Latitude of the upper-left corner.
    pub fn y_upper_left(&self) -> f64 {
        self.y_lower_left + self.cell_size * self.num_rows as f64
    }

    /// Longitude of the upper-right corner.
    pub fn x_upper_left(&self) -> f64 {
        self.x_lower_left + self.cell_size * self.num_columns as f64
    }

    /// Geographic bounding box covered by the grid.
    pub fn bounds(&self) -> GridBounds {
        GridBounds {
            min_lat: self.y_lower_left,
            max_lat: self.y_upper_left(),
            min_long: self.x_lower_left,
            max_long: self.x_upper_left(),
        }
    }

    /// Number of bytes the companion `.flt` file must hold.
    pub fn expected_data_bytes(&self) -> usize {
        self.num_rows as usize * self.num_columns as usize * 4
    }
}
