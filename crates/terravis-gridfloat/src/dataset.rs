//! Prefix-based dataset loading.

use crate::{
    ElevationGrid, GeodesicCellSize, GridFloatError, ProjectionMetadata, RasterHeader, Result,
};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A fully loaded GridFloat dataset.
///
/// A dataset on disk is three files sharing a filename prefix:
/// `<prefix>.hdr` (metadata), `<prefix>.flt` (binary grid), and
/// `<prefix>.prj` (projection metadata). The header and grid are required;
/// the projection file is cosmetic and its absence is non-fatal.
///
/// # Example
///
/// ```no_run
/// use terravis_gridfloat::GridFloatDataset;
///
/// let dataset = GridFloatDataset::load("data/rainier")?;
/// let stats = dataset.grid.stats();
/// println!(
///     "{} x {} cells, {:.1} m to {:.1} m",
///     dataset.header.num_columns,
///     dataset.header.num_rows,
///     stats.min_height,
///     stats.max_height,
/// );
/// # Ok::<(), terravis_gridfloat::GridFloatError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridFloatDataset {
    /// Parsed header metadata.
    pub header: RasterHeader,
    /// Metric cell dimensions derived from the header's bounding box.
    pub cell_size: GeodesicCellSize,
    /// The decoded elevation grid.
    pub grid: ElevationGrid,
    /// Projection metadata, when the `.prj` file was readable.
    pub projection: Option<ProjectionMetadata>,
}

impl GridFloatDataset {
    /// Load the dataset files sharing `prefix`.
    ///
    /// Header parsing, grid decoding, and projection parsing are three
    /// independent operations; a projection failure is logged and leaves
    /// [`GridFloatDataset::projection`] unset, while header or grid
    /// failures propagate.
    pub fn load<P: AsRef<Path>>(prefix: P) -> Result<Self> {
        let prefix = prefix.as_ref();
        let hdr_path = with_extension(prefix, "hdr");
        let flt_path = with_extension(prefix, "flt");
        let prj_path = with_extension(prefix, "prj");

        let projection = match ProjectionMetadata::from_file(&prj_path) {
            Ok(meta) => {
                debug!(path = %prj_path.display(), "projection metadata read\n{meta}");
                Some(meta)
            }
            Err(err) => {
                warn!(path = %prj_path.display(), "projection metadata unavailable: {err}");
                None
            }
        };

        let header = RasterHeader::from_file(&hdr_path)?;
        let cell_size =
            GeodesicCellSize::from_bounds(&header.bounds(), header.num_columns, header.num_rows)?;
        let bounds = header.bounds();
        debug!(
            path = %hdr_path.display(),
            "header read: {} columns x {} rows, cell size {:.2} m x {:.2} m, \
             {:.4}\u{b0} to {:.4}\u{b0} latitude, {:.4}\u{b0} to {:.4}\u{b0} longitude",
            header.num_columns,
            header.num_rows,
            cell_size.cell_size_x,
            cell_size.cell_size_y,
            bounds.min_lat,
            bounds.max_lat,
            bounds.min_long,
            bounds.max_long,
        );

        let file = File::open(&flt_path).map_err(|source| GridFloatError::MissingFile {
            path: flt_path.clone(),
            source,
        })?;
        let grid = ElevationGrid::decode(&header, BufReader::new(file), &flt_path)?;
        let stats = grid.stats();
        debug!(
            path = %flt_path.display(),
            "grid read: min {:.2}, max {:.2}, avg {:.2}, {} empty of {} cells",
            stats.min_height,
            stats.max_height,
            stats.avg_height,
            stats.num_empty_cells,
            stats.num_cells + stats.num_empty_cells,
        );

        Ok(Self {
            header,
            cell_size,
            grid,
            projection,
        })
    }
}

fn with_extension(prefix: &Path, ext: &str) -> PathBuf {
    let mut path = prefix.as_os_str().to_os_string();
    path.push(".");
    path.push(ext);
    PathBuf::from(path)
}
