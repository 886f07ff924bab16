//! CSV source-position loader.
//!
//! # CSV format
//!
//! Exactly two columns, named `x` and `y`, one row per source:
//!
//! ```csv
//! x,y
//! -1.0,1.0
//! 3.5,-0.25
//! ```
//!
//! A header with any other number of columns, a row with a different field
//! count, or a cell that does not parse as a number is a
//! [`EnvError::TypeConfiguration`].  A header with no rows is a valid empty
//! set.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ps_core::Point2;

use crate::{EnvError, EnvResult, SourceSet};

#[derive(Deserialize)]
struct SourceRow {
    x: f64,
    y: f64,
}

/// Load a [`SourceSet`] from a CSV file.
pub fn load_sources_csv(path: &Path) -> EnvResult<SourceSet> {
    let file = std::fs::File::open(path).map_err(EnvError::Io)?;
    load_sources_reader(file)
}

/// Like [`load_sources_csv`] but accepts any `Read` source.
pub fn load_sources_reader<R: Read>(reader: R) -> EnvResult<SourceSet> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let columns = csv_reader.headers()?.len();
    if columns != 2 {
        return Err(EnvError::TypeConfiguration(format!(
            "expected 2 columns (x, y), found {columns}"
        )));
    }

    let mut positions = Vec::new();
    for (i, result) in csv_reader.deserialize::<SourceRow>().enumerate() {
        let row = result
            .map_err(|e| EnvError::TypeConfiguration(format!("source row {}: {e}", i + 1)))?;
        positions.push(Point2::new(row.x, row.y));
    }

    SourceSet::from_points(positions)
}
