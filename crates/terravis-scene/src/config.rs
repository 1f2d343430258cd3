//! Display configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use terravis_contour::Rgb;
use thiserror::Error;

/// Errors that can occur loading a display configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read config {path}: {source}")]
    Read {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for [`DisplayConfig`].
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },
}

/// Tunable display defaults, loadable from a YAML file.
///
/// Every field has a default matching the viewer's traditional settings,
/// so a config file only needs the fields it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Number of contour levels to request.
    pub num_contours: u32,
    /// Ramp color for the lowest elevations.
    pub low_color: Rgb,
    /// Ramp color for the highest elevations.
    pub high_color: Rgb,
    /// Color of the highest-point marker.
    pub marker_color: Rgb,
    /// Color of contour lines (uniform, not elevation-mapped).
    pub contour_color: Rgb,
    /// Side length of the square display region the grid is fit into.
    pub grid_scale: f64,
    /// Upper bound on rendered rows/columns; drives the default stride.
    pub max_grid_points: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            num_contours: 10,
            low_color: Rgb::BLUE,
            high_color: Rgb::RED,
            marker_color: Rgb::WHITE,
            contour_color: Rgb::BLACK,
            grid_scale: 20.0,
            max_grid_points: 1000,
        }
    }
}

impl DisplayConfig {
    /// Load a configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default sampling stride for a grid of the given dimensions.
    ///
    /// Large grids are thinned so that at most `max_grid_points` rows or
    /// columns are rendered.
    pub fn default_stride(&self, num_columns: u32, num_rows: u32) -> u32 {
        let longest = num_columns.max(num_rows);
        longest.div_ceil(self.max_grid_points.max(1)).max(1)
    }
}
