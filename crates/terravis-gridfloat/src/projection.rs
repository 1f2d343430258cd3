//! Projection (`.prj`) metadata.
//!
//! The projection file is an unordered set of `<key> <value>` lines. The
//! values are carried through for display only; nothing downstream
//! computes with them, and they are never validated.

use crate::{GridFloatError, Result};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Opaque projection metadata from a GridFloat `.prj` file.
///
/// An absent key leaves the field unset. Unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct ProjectionMetadata {
    /// Map projection name.
    pub projection: Option<String>,
    /// Horizontal datum.
    pub datum: Option<String>,
    /// Vertical units.
    pub z_units: Option<String>,
    /// Horizontal units.
    pub units: Option<String>,
    /// Reference spheroid.
    pub spheroid: Option<String>,
    /// X shift applied by the producer.
    pub x_shift: Option<String>,
    /// Y shift applied by the producer.
    pub y_shift: Option<String>,
    /// Free-form projection parameters.
    pub parameters: Option<String>,
}

impl ProjectionMetadata {
    /// Read and parse a projection file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GridFloatError::MissingFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse projection metadata from any buffered source.
    pub fn from_reader<R: Read>(reader: BufReader<R>) -> Result<Self> {
        let mut meta = Self::default();
        for line in reader.lines() {
            let line = line?;
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                continue;
            };
            let value = Some(value.to_string());
            match key {
                "Projection" => meta.projection = value,
                "Datum" => meta.datum = value,
                "Zunits" => meta.z_units = value,
                "Units" => meta.units = value,
                "Spheroid" => meta.spheroid = value,
                "Xshift" => meta.x_shift = value,
                "Yshift" => meta.y_shift = value,
                "Parameters" => meta.parameters = value,
                _ => {}
            }
        }
        Ok(meta)
    }
}

impl fmt::Display for ProjectionMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unset = "(unset)";
        let get = |v: &Option<String>| v.clone().unwrap_or_else(|| unset.to_string());
        writeln!(f, "Projection: {}", get(&self.projection))?;
        writeln!(f, "Datum: {}", get(&self.datum))?;
        writeln!(f, "Zunits: {}", get(&self.z_units))?;
        writeln!(f, "Units: {}", get(&self.units))?;
        writeln!(f, "Spheroid: {}", get(&self.spheroid))?;
        writeln!(f, "Xshift: {}", get(&self.x_shift))?;
        writeln!(f, "Yshift: {}", get(&self.y_shift))?;
        write!(f, "Parameters: {}", get(&self.parameters))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> ProjectionMetadata {
        ProjectionMetadata::from_reader(BufReader::new(text.as_bytes())).unwrap()
    }

    #[test]
    fn test_parse_full_file() {
        let meta = parse(
            "Projection GEOGRAPHIC\nDatum NAD83\nZunits METERS\nUnits DD\n\
             Spheroid GRS1980\nXshift 0.0\nYshift 0.0\nParameters none\n",
        );
        assert_eq!(meta.projection.as_deref(), Some("GEOGRAPHIC"));
        assert_eq!(meta.datum.as_deref(), Some("NAD83"));
        assert_eq!(meta.z_units.as_deref(), Some("METERS"));
        assert_eq!(meta.units.as_deref(), Some("DD"));
        assert_eq!(meta.spheroid.as_deref(), Some("GRS1980"));
        assert_eq!(meta.x_shift.as_deref(), Some("0.0"));
        assert_eq!(meta.y_shift.as_deref(), Some("0.0"));
        assert_eq!(meta.parameters.as_deref(), Some("none"));
    }

    #[test]
    fn test_partial_and_unordered() {
        let meta = parse("Datum WGS84\nProjection GEOGRAPHIC\n");
        assert_eq!(meta.projection.as_deref(), Some("GEOGRAPHIC"));
        assert_eq!(meta.datum.as_deref(), Some("WGS84"));
        assert!(meta.spheroid.is_none());
    }

    #[test]
    fn test_unknown_keys_and_bare_lines_ignored() {
        let meta = parse("Wibble 3\nDatum NAD27\nLoneKey\n\n");
        assert_eq!(meta.datum.as_deref(), Some("NAD27"));
        assert!(meta.projection.is_none());
    }

    #[test]
    fn test_display_marks_unset_fields() {
        let meta = parse("Projection GEOGRAPHIC\n");
        let text = meta.to_string();
        assert!(text.contains("Projection: GEOGRAPHIC"));
        assert!(text.contains("Datum: (unset)"));
    }
}
