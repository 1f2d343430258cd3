//! # terravis-contour
//!
//! Iso-elevation contour extraction over decoded GridFloat grids.
//!
//! Given an elevation grid, a set of evenly spaced levels, and a sampling
//! stride, the engine classifies each grid cell against each level
//! (a marching-squares variant) and emits 3D line segments positioned for
//! the renderer. The ambiguous saddle configuration is resolved by a
//! fixed, grid-wide tie-break so adjacent cells never disagree about
//! which edges a contour connects.
//!
//! ## Example
//!
//! ```no_run
//! use terravis_contour::{extract, ContourRequest, GridLayout, Rgb};
//! use terravis_gridfloat::GridFloatDataset;
//!
//! let dataset = GridFloatDataset::load("data/rainier")?;
//! let layout = GridLayout::fit(
//!     dataset.header.num_columns,
//!     dataset.header.num_rows,
//!     &dataset.cell_size,
//!     20.0,
//! );
//! let request = ContourRequest::new(10, 500.0, 4000.0, 1)?;
//! let segments = extract(&dataset.grid, &request, &layout, Rgb::BLACK)?;
//! println!("{} contour segments", segments.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;
mod geometry;
mod request;

pub use engine::{extract, ContourError};
pub use geometry::{GridLayout, Point3, Rgb, Segment};
pub use request::ContourRequest;
