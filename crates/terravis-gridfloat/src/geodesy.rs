//! Great-circle cell sizing.
//!
//! The header's cell size is angular (degrees per cell). Rendering needs
//! metric cell dimensions, which depend on where the grid sits on the
//! globe: a degree of longitude shrinks toward the poles while a degree of
//! latitude does not. The haversine distance along the grid's bounding
//! edges gives the real-world cell dimensions and their anisotropy ratio.

use crate::{GridBounds, GridFloatError, Result};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculate the great-circle distance between two points using the
/// haversine formula.
///
/// Inputs are decimal degrees; the result is in meters.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

/// Metric cell dimensions derived from a grid's bounding box.
///
/// `cell_size_x` is measured along the bottom edge of the box and
/// `cell_size_y` along the left edge, each divided by the respective cell
/// count. Recomputed whenever a header is loaded; never cached.
#[derive(Debug, Clone, Copy)]
pub struct GeodesicCellSize {
    /// East-west extent of one cell in meters.
    pub cell_size_x: f64,
    /// North-south extent of one cell in meters.
    pub cell_size_y: f64,
    /// Anisotropy ratio `cell_size_y / cell_size_x`.
    pub ratio: f64,
}

impl GeodesicCellSize {
    /// Compute metric cell dimensions for a grid covering `bounds`.
    ///
    /// Fails with [`GridFloatError::DegenerateGrid`] when the grid has a
    /// single row or column; such a grid has no interior cells to size.
    pub fn from_bounds(bounds: &GridBounds, num_columns: u32, num_rows: u32) -> Result<Self> {
        if num_columns <= 1 || num_rows <= 1 {
            return Err(GridFloatError::DegenerateGrid(format!(
                "{num_columns}x{num_rows} grid is too small to derive cell dimensions"
            )));
        }

        let cell_size_x = haversine(bounds.min_lat, bounds.min_long, bounds.min_lat, bounds.max_long)
            / num_columns as f64;
        let cell_size_y = haversine(bounds.min_lat, bounds.min_long, bounds.max_lat, bounds.min_long)
            / num_rows as f64;

        Ok(Self {
            cell_size_x,
            cell_size_y,
            ratio: cell_size_y / cell_size_x,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn degree_box(min_lat: f64, min_long: f64) -> GridBounds {
        GridBounds {
            min_lat,
            max_lat: min_lat + 1.0,
            min_long,
            max_long: min_long + 1.0,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // Seattle to Portland is approximately 233 km.
        let dist = haversine(47.6062, -122.3321, 45.5152, -122.6784);
        assert!((dist - 233_000.0).abs() < 5_000.0);
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine(45.0, -120.0, 45.0, -120.0), 0.0);
    }

    #[test]
    fn test_equator_box_is_nearly_isotropic() {
        let size = GeodesicCellSize::from_bounds(&degree_box(0.0, 10.0), 100, 100).unwrap();
        assert!(size.cell_size_x > 0.0 && size.cell_size_y > 0.0);
        // At the equator a degree of longitude and latitude are nearly the
        // same length.
        assert_relative_eq!(size.ratio, 1.0, max_relative = 5e-3);
    }

    #[test]
    fn test_polar_box_diverges() {
        let size = GeodesicCellSize::from_bounds(&degree_box(80.0, 10.0), 100, 100).unwrap();
        // Longitude degrees are compressed near the pole.
        assert!(size.ratio > 2.0, "ratio was {}", size.ratio);
    }

    #[test]
    fn test_cell_counts_divide_edges() {
        let bounds = degree_box(40.0, -100.0);
        let coarse = GeodesicCellSize::from_bounds(&bounds, 10, 10).unwrap();
        let fine = GeodesicCellSize::from_bounds(&bounds, 100, 100).unwrap();
        assert_relative_eq!(coarse.cell_size_x / 10.0, fine.cell_size_x, max_relative = 1e-12);
        assert_relative_eq!(coarse.cell_size_y / 10.0, fine.cell_size_y, max_relative = 1e-12);
    }

    #[test]
    fn test_single_row_or_column_is_degenerate() {
        let bounds = degree_box(40.0, -100.0);
        assert!(matches!(
            GeodesicCellSize::from_bounds(&bounds, 1, 100),
            Err(GridFloatError::DegenerateGrid(_))
        ));
        assert!(matches!(
            GeodesicCellSize::from_bounds(&bounds, 100, 1),
            Err(GridFloatError::DegenerateGrid(_))
        ));
    }
}
