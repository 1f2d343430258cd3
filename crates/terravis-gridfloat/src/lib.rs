//! # terravis-gridfloat
//!
//! Reader for the GridFloat elevation raster format served by the USGS
//! National Map: a line-oriented `.hdr` metadata file, a raw binary `.flt`
//! grid of 32-bit floats, and an optional `.prj` projection file.
//!
//! ## Overview
//!
//! Loading happens in three stages with a strict data dependency:
//!
//! 1. The header declares grid dimensions, the lower-left corner, the
//!    angular cell size, the no-data sentinel, and the byte order.
//! 2. The grid's bounding box is converted to metric cell dimensions via
//!    great-circle distance along its edges.
//! 3. The binary body is decoded in a single pass that also gathers
//!    min/max/mean statistics and the locations of the extrema.
//!
//! The projection file is parsed independently and only carried through
//! for display; a missing `.prj` never fails a load.
//!
//! ## Example
//!
//! ```no_run
//! use terravis_gridfloat::GridFloatDataset;
//!
//! let dataset = GridFloatDataset::load("data/rainier")?;
//! let stats = dataset.grid.stats();
//! println!("mean elevation: {:.1} m", stats.avg_height);
//! println!("cell anisotropy: {:.3}", dataset.cell_size.ratio);
//! # Ok::<(), terravis_gridfloat::GridFloatError>(())
//! ```

mod dataset;
mod error;
mod geodesy;
mod grid;
mod header;
mod projection;

pub use dataset::GridFloatDataset;
pub use error::GridFloatError;
pub use geodesy::{haversine, GeodesicCellSize};
pub use grid::{ElevationGrid, GridStats};
pub use header::{ByteOrder, GridBounds, RasterHeader};
pub use projection::ProjectionMetadata;

/// Result type for GridFloat operations.
pub type Result<T> = std::result::Result<T, GridFloatError>;
