//! Elevation-to-color mapping for mesh vertices.

use terravis_contour::Rgb;

/// Map an elevation onto the low-to-high color ramp.
///
/// Elevations at or below `min_height` return `low` exactly and those at
/// or above `max_height` return `high` exactly; a flat grid
/// (`min_height == max_height`) maps everything to `low`. In between,
/// each channel is interpolated linearly by the normalized elevation.
pub fn elevation_to_color(
    elevation: f64,
    min_height: f64,
    max_height: f64,
    low: Rgb,
    high: Rgb,
) -> Rgb {
    if elevation <= min_height {
        low
    } else if elevation >= max_height {
        high
    } else if min_height == max_height {
        low
    } else {
        let t = (elevation - min_height) / (max_height - min_height);
        Rgb::new(
            low.r + (high.r - low.r) * t,
            low.g + (high.g - low.g) * t,
            low.b + (high.b - low.b) * t,
        )
    }
}
