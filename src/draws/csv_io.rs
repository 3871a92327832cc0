//! CSV import/export for draw matrices, for exchange with spreadsheet tools.
//!
//! Layout: header row `alt_1,...,alt_k`, then one record per draw.

use std::path::Path;

use crate::draws::matrix::{DrawsError, DrawsMatrix};

/// Write `matrix` as CSV at `path`.
pub fn export_draws_csv(matrix: &DrawsMatrix, path: impl AsRef<Path>) -> Result<(), DrawsError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let mut writer = csv::Writer::from_path(path).map_err(|err| DrawsError::Parse {
        path: display.clone(),
        message: err.to_string(),
    })?;

    let header: Vec<String> = (1..=matrix.n_alternatives())
        .map(|index| format!("alt_{index}"))
        .collect();
    writer.write_record(&header).map_err(|err| DrawsError::Parse {
        path: display.clone(),
        message: err.to_string(),
    })?;

    for row in matrix.rows() {
        let record: Vec<String> = row.iter().map(|value| value.to_string()).collect();
        writer.write_record(&record).map_err(|err| DrawsError::Parse {
            path: display.clone(),
            message: err.to_string(),
        })?;
    }

    writer.flush().map_err(|source| DrawsError::Io {
        path: display,
        source,
    })
}

/// Read a draws matrix from CSV at `path`. The header row is skipped.
pub fn import_draws_csv(path: impl AsRef<Path>) -> Result<DrawsMatrix, DrawsError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|err| DrawsError::Parse {
            path: display.clone(),
            message: err.to_string(),
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|err| DrawsError::Parse {
            path: display.clone(),
            message: err.to_string(),
        })?;
        let mut row = Vec::with_capacity(record.len());
        for field in record.iter() {
            let value: f64 = field.trim().parse().map_err(|_| DrawsError::Parse {
                path: display.clone(),
                message: format!("record {index}: '{field}' is not a number"),
            })?;
            row.push(value);
        }
        rows.push(row);
    }
    DrawsMatrix::from_rows(rows)
}
