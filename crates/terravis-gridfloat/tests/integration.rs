//! Integration tests over synthetic on-disk datasets.

use std::fs;
use std::path::PathBuf;
use terravis_gridfloat::{ByteOrder, GridFloatDataset, GridFloatError};

/// Write a synthetic dataset into `dir` and return the prefix path.
fn write_dataset(
    dir: &tempfile::TempDir,
    name: &str,
    cols: u32,
    rows: u32,
    values: &[f32],
    order: ByteOrder,
    with_prj: bool,
) -> PathBuf {
    let prefix = dir.path().join(name);

    let token = match order {
        ByteOrder::BigEndian => "MSBFIRST",
        ByteOrder::LittleEndian => "LSBFIRST",
    };
    fs::write(
        prefix.with_extension("hdr"),
        format!(
            "ncols {cols}\nnrows {rows}\nxllcorner -122.0\nyllcorner 47.0\ncellsize 0.01\n\
             NODATA_value -9999\nbyteorder {token}\n"
        ),
    )
    .unwrap();

    let mut body = Vec::with_capacity(values.len() * 4);
    for v in values {
        match order {
            ByteOrder::BigEndian => body.extend_from_slice(&v.to_be_bytes()),
            ByteOrder::LittleEndian => body.extend_from_slice(&v.to_le_bytes()),
        }
    }
    fs::write(prefix.with_extension("flt"), body).unwrap();

    if with_prj {
        fs::write(
            prefix.with_extension("prj"),
            "Projection GEOGRAPHIC\nDatum NAD83\nZunits METERS\nUnits DD\nSpheroid GRS1980\n",
        )
        .unwrap();
    }

    prefix
}

#[test]
fn test_load_full_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let values = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
    let prefix = write_dataset(&dir, "full", 3, 2, &values, ByteOrder::BigEndian, true);

    let dataset = GridFloatDataset::load(&prefix).expect("dataset should load");

    assert_eq!(dataset.header.num_columns, 3);
    assert_eq!(dataset.header.num_rows, 2);
    assert_eq!(dataset.grid.samples(), &values);

    let stats = dataset.grid.stats();
    assert_eq!(stats.min_height, 10.0);
    assert_eq!(stats.max_height, 60.0);
    assert_eq!(stats.avg_height, 35.0);
    assert_eq!(stats.num_cells + stats.num_empty_cells, 6);

    let projection = dataset.projection.expect("prj file was present");
    assert_eq!(projection.datum.as_deref(), Some("NAD83"));

    assert!(dataset.cell_size.cell_size_x > 0.0);
    assert!(dataset.cell_size.cell_size_y > 0.0);
    assert!(dataset.cell_size.ratio > 0.0);
}

#[test]
fn test_byte_orders_decode_identically() {
    let dir = tempfile::tempdir().unwrap();
    let values = [1.25, -7.5, 3.75, 2.5];
    let big = write_dataset(&dir, "big", 2, 2, &values, ByteOrder::BigEndian, false);
    let little = write_dataset(&dir, "little", 2, 2, &values, ByteOrder::LittleEndian, false);

    let big = GridFloatDataset::load(&big).unwrap();
    let little = GridFloatDataset::load(&little).unwrap();

    for (a, b) in big.grid.samples().iter().zip(little.grid.samples()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_missing_prj_is_non_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = write_dataset(
        &dir,
        "noprj",
        2,
        2,
        &[1.0, 2.0, 3.0, 4.0],
        ByteOrder::LittleEndian,
        false,
    );

    let dataset = GridFloatDataset::load(&prefix).unwrap();
    assert!(dataset.projection.is_none());
}

#[test]
fn test_missing_header_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = write_dataset(
        &dir,
        "nohdr",
        2,
        2,
        &[1.0, 2.0, 3.0, 4.0],
        ByteOrder::LittleEndian,
        true,
    );
    fs::remove_file(prefix.with_extension("hdr")).unwrap();

    let err = GridFloatDataset::load(&prefix).unwrap_err();
    match err {
        GridFloatError::MissingFile { path, .. } => {
            assert_eq!(path.extension().unwrap(), "hdr");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_truncated_body_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = write_dataset(
        &dir,
        "short",
        4,
        4,
        &[1.0; 10], // 10 of 16 records
        ByteOrder::BigEndian,
        false,
    );

    let err = GridFloatDataset::load(&prefix).unwrap_err();
    match err {
        GridFloatError::TruncatedData {
            expected_bytes,
            actual_bytes,
            ..
        } => {
            assert_eq!(expected_bytes, 64);
            assert_eq!(actual_bytes, 40);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_reload_replaces_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let first = write_dataset(&dir, "a", 2, 2, &[1.0, 2.0, 3.0, 4.0], ByteOrder::BigEndian, false);
    let second = write_dataset(&dir, "b", 2, 2, &[9.0, 8.0, 7.0, 6.0], ByteOrder::BigEndian, false);

    let mut current = GridFloatDataset::load(&first).unwrap();
    assert_eq!(current.grid.stats().max_height, 4.0);

    // Last load wins; nothing from the first dataset survives.
    current = GridFloatDataset::load(&second).unwrap();
    assert_eq!(current.grid.stats().max_height, 9.0);
    assert_eq!(current.grid.stats().min_height, 6.0);
}
