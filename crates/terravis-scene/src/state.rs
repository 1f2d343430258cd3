//! Scene state shared between the extraction engine and its caller.
//!
//! The original viewer drove redraws from process-wide booleans; here the
//! current dataset, the display parameters, and the "needs regeneration"
//! flags live in one owned state object. Artifacts are regenerated only
//! when a parameter affecting them has changed since they were last
//! produced.

use crate::config::DisplayConfig;
use crate::mesh::{build_strips, peak_marker, MeshVertex};
use terravis_contour::{extract, ContourError, ContourRequest, GridLayout, Rgb, Segment};
use terravis_gridfloat::GridFloatDataset;
use thiserror::Error;

/// Offset applied when seeding the contour range from a fresh grid, so
/// the lowest and highest contours sit inside the elevation extremes.
const CONTOUR_RANGE_MARGIN: f64 = 10.0;

/// Errors from scene-level operations.
#[derive(Debug, Error)]
pub enum SceneError {
    /// An artifact was requested before any dataset was loaded.
    #[error("No grid is loaded")]
    NoGridLoaded,

    /// Contour extraction failed.
    #[error(transparent)]
    Contour(#[from] ContourError),
}

/// Current dataset, display parameters, and cached derived artifacts.
///
/// Loading is last-load-wins: a new dataset replaces the previous one
/// wholesale and invalidates every cached artifact. Only one load is ever
/// in flight, so no locking is involved.
#[derive(Debug)]
pub struct SceneState {
    config: DisplayConfig,
    dataset: Option<GridFloatDataset>,
    layout: Option<GridLayout>,
    request: ContourRequest,
    contours_dirty: bool,
    mesh_dirty: bool,
    cached_contours: Vec<Segment>,
    cached_mesh: Vec<Vec<MeshVertex>>,
}

impl SceneState {
    /// Create an empty scene with the given display defaults.
    pub fn new(config: DisplayConfig) -> Self {
        let request = ContourRequest {
            level_count: config.num_contours,
            low_value: 0.0,
            high_value: 0.0,
            stride: 1,
        };
        Self {
            config,
            dataset: None,
            layout: None,
            request,
            contours_dirty: false,
            mesh_dirty: false,
            cached_contours: Vec::new(),
            cached_mesh: Vec::new(),
        }
    }

    /// Replace the current dataset.
    ///
    /// Recomputes the display layout, seeds the contour range from the
    /// grid's extremes, picks the default stride for the grid size, and
    /// marks every artifact for regeneration.
    pub fn load(&mut self, dataset: GridFloatDataset) {
        let header = &dataset.header;
        self.layout = Some(GridLayout::fit(
            header.num_columns,
            header.num_rows,
            &dataset.cell_size,
            self.config.grid_scale,
        ));

        let stats = dataset.grid.stats();
        let mut low = stats.min_height.floor() + CONTOUR_RANGE_MARGIN;
        let mut high = stats.max_height.ceil() - CONTOUR_RANGE_MARGIN;
        if low > high {
            low = stats.min_height;
            high = stats.max_height;
        }
        self.request = ContourRequest {
            level_count: self.config.num_contours,
            low_value: low,
            high_value: high,
            stride: self
                .config
                .default_stride(header.num_columns, header.num_rows),
        };

        self.dataset = Some(dataset);
        self.contours_dirty = true;
        self.mesh_dirty = true;
    }

    /// The currently loaded dataset, if any.
    pub fn dataset(&self) -> Option<&GridFloatDataset> {
        self.dataset.as_ref()
    }

    /// The active contour request.
    pub fn request(&self) -> &ContourRequest {
        &self.request
    }

    /// The active display layout, once a dataset is loaded.
    pub fn layout(&self) -> Option<&GridLayout> {
        self.layout.as_ref()
    }

    /// Whether the contour cache needs regeneration.
    pub fn contours_dirty(&self) -> bool {
        self.contours_dirty
    }

    /// Whether the mesh cache needs regeneration.
    pub fn mesh_dirty(&self) -> bool {
        self.mesh_dirty
    }

    /// Set the number of contour levels.
    pub fn set_level_count(&mut self, level_count: u32) {
        self.request.level_count = level_count;
        self.contours_dirty = true;
    }

    /// Set the contour elevation range.
    pub fn set_range(&mut self, low_value: f64, high_value: f64) {
        self.request.low_value = low_value;
        self.request.high_value = high_value;
        self.contours_dirty = true;
    }

    /// Set the sampling stride. Affects both contours and mesh.
    pub fn set_stride(&mut self, stride: u32) -> Result<(), SceneError> {
        if stride == 0 {
            return Err(ContourError::InvalidStride.into());
        }
        self.request.stride = stride;
        self.contours_dirty = true;
        self.mesh_dirty = true;
        Ok(())
    }

    /// Set the elevation ramp colors used for mesh vertices.
    pub fn set_ramp_colors(&mut self, low: Rgb, high: Rgb) {
        self.config.low_color = low;
        self.config.high_color = high;
        self.mesh_dirty = true;
    }

    /// Set the uniform contour color.
    pub fn set_contour_color(&mut self, color: Rgb) {
        self.config.contour_color = color;
        self.contours_dirty = true;
    }

    /// Set the highest-point marker color.
    pub fn set_marker_color(&mut self, color: Rgb) {
        self.config.marker_color = color;
    }

    /// Override the depth scale of the active layout.
    pub fn set_depth_scale(&mut self, depth_scale: f64) -> Result<(), SceneError> {
        let layout = self.layout.as_mut().ok_or(SceneError::NoGridLoaded)?;
        layout.depth_scale = depth_scale;
        self.contours_dirty = true;
        self.mesh_dirty = true;
        Ok(())
    }

    /// Contour segments for the current dataset and parameters.
    ///
    /// Fails fast when no dataset is loaded. Regenerates through the
    /// extraction engine only when a relevant parameter changed since the
    /// last call; otherwise the cached segments are returned.
    pub fn contours(&mut self) -> Result<&[Segment], SceneError> {
        let dataset = self.dataset.as_ref().ok_or(SceneError::NoGridLoaded)?;
        let layout = self.layout.as_ref().ok_or(SceneError::NoGridLoaded)?;
        if self.contours_dirty {
            self.cached_contours = extract(
                &dataset.grid,
                &self.request,
                layout,
                self.config.contour_color,
            )?;
            self.contours_dirty = false;
        }
        Ok(&self.cached_contours)
    }

    /// Mesh vertex strips for the current dataset and parameters.
    pub fn mesh(&mut self) -> Result<&[Vec<MeshVertex>], SceneError> {
        let dataset = self.dataset.as_ref().ok_or(SceneError::NoGridLoaded)?;
        let layout = self.layout.as_ref().ok_or(SceneError::NoGridLoaded)?;
        if self.mesh_dirty {
            self.cached_mesh = build_strips(
                &dataset.grid,
                layout,
                self.request.stride,
                self.config.low_color,
                self.config.high_color,
            );
            self.mesh_dirty = false;
        }
        Ok(&self.cached_mesh)
    }

    /// The highest-point marker for the current dataset.
    pub fn peak_marker(&self) -> Result<MeshVertex, SceneError> {
        let dataset = self.dataset.as_ref().ok_or(SceneError::NoGridLoaded)?;
        let layout = self.layout.as_ref().ok_or(SceneError::NoGridLoaded)?;
        Ok(peak_marker(&dataset.grid, layout, self.config.marker_color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::BufReader;
    use std::path::Path;
    use terravis_gridfloat::{ElevationGrid, GeodesicCellSize, RasterHeader};

    /// An in-memory dataset with a 4x4 ramp from 0 to 93.75 m.
    fn dataset() -> GridFloatDataset {
        let text = "ncols 4\nnrows 4\nxllcorner -100.0\nyllcorner 40.0\ncellsize 0.01\n\
                    NODATA_value -9999\nbyteorder LSBFIRST\n";
        let header =
            RasterHeader::from_reader(BufReader::new(text.as_bytes()), Path::new("test.hdr"))
                .unwrap();
        let values: Vec<f32> = (0..16).map(|i| i as f32 * 6.25).collect();
        let mut body = Vec::with_capacity(values.len() * 4);
        for v in &values {
            body.extend_from_slice(&v.to_le_bytes());
        }
        let grid = ElevationGrid::decode(&header, body.as_slice(), Path::new("test.flt")).unwrap();
        let cell_size =
            GeodesicCellSize::from_bounds(&header.bounds(), header.num_columns, header.num_rows)
                .unwrap();
        GridFloatDataset {
            header,
            cell_size,
            grid,
            projection: None,
        }
    }

    #[test]
    fn test_artifacts_refused_without_dataset() {
        let mut scene = SceneState::new(DisplayConfig::default());
        assert!(matches!(scene.contours(), Err(SceneError::NoGridLoaded)));
        assert!(matches!(scene.mesh(), Err(SceneError::NoGridLoaded)));
        assert!(matches!(scene.peak_marker(), Err(SceneError::NoGridLoaded)));
    }

    #[test]
    fn test_load_seeds_request_and_marks_dirty() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());

        assert!(scene.contours_dirty());
        assert!(scene.mesh_dirty());
        let request = scene.request();
        assert_eq!(request.level_count, 10);
        // Range seeded inside the 0..94 m extremes.
        assert_eq!(request.low_value, 10.0);
        assert_eq!(request.high_value, 84.0);
        assert_eq!(request.stride, 1);
    }

    #[test]
    fn test_regeneration_happens_once() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());

        let first = scene.contours().unwrap().to_vec();
        assert!(!first.is_empty());
        assert!(!scene.contours_dirty());

        // A clean scene serves the cache unchanged.
        let second = scene.contours().unwrap();
        assert_eq!(first, second);
        assert!(!scene.contours_dirty());
    }

    #[test]
    fn test_contour_params_do_not_touch_mesh() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());
        scene.mesh().unwrap();
        scene.contours().unwrap();

        scene.set_level_count(5);
        assert!(scene.contours_dirty());
        assert!(!scene.mesh_dirty());

        scene.contours().unwrap();
        scene.set_range(20.0, 70.0);
        assert!(scene.contours_dirty());
        assert!(!scene.mesh_dirty());
    }

    #[test]
    fn test_ramp_colors_only_touch_mesh() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());
        scene.contours().unwrap();
        scene.mesh().unwrap();

        scene.set_ramp_colors(Rgb::BLACK, Rgb::WHITE);
        assert!(scene.mesh_dirty());
        assert!(!scene.contours_dirty());
    }

    #[test]
    fn test_stride_touches_both() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());
        scene.contours().unwrap();
        scene.mesh().unwrap();

        scene.set_stride(2).unwrap();
        assert!(scene.contours_dirty());
        assert!(scene.mesh_dirty());
        assert!(matches!(
            scene.set_stride(0),
            Err(SceneError::Contour(ContourError::InvalidStride))
        ));
    }

    #[test]
    fn test_depth_scale_rescales_contours() {
        let mut scene = SceneState::new(DisplayConfig::default());
        assert!(scene.set_depth_scale(1.0).is_err());

        scene.load(dataset());
        scene.set_depth_scale(1.0).unwrap();
        let shallow = scene.contours().unwrap().to_vec();

        scene.set_depth_scale(2.0).unwrap();
        assert!(scene.contours_dirty());
        let deep = scene.contours().unwrap();
        for (a, b) in shallow.iter().zip(deep) {
            assert_eq!(a.start.z * 2.0, b.start.z);
        }
    }

    #[test]
    fn test_reload_replaces_wholesale() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());
        scene.contours().unwrap();
        scene.mesh().unwrap();
        assert!(!scene.contours_dirty() && !scene.mesh_dirty());

        scene.load(dataset());
        assert!(scene.contours_dirty());
        assert!(scene.mesh_dirty());
    }

    #[test]
    fn test_peak_marker_uses_configured_color() {
        let mut scene = SceneState::new(DisplayConfig::default());
        scene.load(dataset());
        assert_eq!(scene.peak_marker().unwrap().color, Rgb::WHITE);

        scene.set_marker_color(Rgb::RED);
        assert_eq!(scene.peak_marker().unwrap().color, Rgb::RED);
    }
}
