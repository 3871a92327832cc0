//! Shock draw matrix: one row per Monte Carlo draw, one column per alternative.
//! Written by the generator, loaded at evaluation time from data/draws.json.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_DRAWS_PATH: &str = "data/draws.json";

/// Serialized draws document (EMAX schema).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawsDocument {
    #[serde(default)]
    pub data_version: Option<String>,
    #[serde(default)]
    pub source_note: Option<String>,
    #[serde(default)]
    pub seed: Option<u64>,
    pub rows: Vec<Vec<f64>>,
}

/// In-memory draw matrix. Invariant: every row has `n_alternatives` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawsMatrix {
    n_alternatives: usize,
    rows: Vec<Vec<f64>>,
}

#[derive(Debug)]
pub enum DrawsError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        path: String,
        message: String,
    },
    /// Rows of unequal width, or an empty matrix.
    Shape {
        message: String,
    },
}

impl fmt::Display for DrawsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read draws file '{path}': {source}"),
            Self::Parse { path, message } => {
                write!(f, "cannot parse draws file '{path}': {message}")
            }
            Self::Shape { message } => write!(f, "malformed draws matrix: {message}"),
        }
    }
}

impl std::error::Error for DrawsError {}

impl DrawsMatrix {
    /// Build from raw rows. Fails if rows are empty or ragged.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, DrawsError> {
        let Some(first) = rows.first() else {
            return Err(DrawsError::Shape {
                message: "no draw rows".to_string(),
            });
        };
        let width = first.len();
        if width == 0 {
            return Err(DrawsError::Shape {
                message: "draw rows have zero columns".to_string(),
            });
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(DrawsError::Shape {
                    message: format!(
                        "row {index} has {} columns, expected {width}",
                        row.len()
                    ),
                });
            }
        }
        Ok(Self {
            n_alternatives: width,
            rows,
        })
    }

    pub fn n_draws(&self) -> usize {
        self.rows.len()
    }

    pub fn n_alternatives(&self) -> usize {
        self.n_alternatives
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &[f64] {
        &self.rows[index]
    }
}

/// Load a draws matrix from a JSON document at `path`.
pub fn load_draws(path: impl AsRef<Path>) -> Result<DrawsMatrix, DrawsError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let data = fs::read_to_string(path).map_err(|source| DrawsError::Io {
        path: display.clone(),
        source,
    })?;
    let document: DrawsDocument =
        serde_json::from_str(&data).map_err(|err| DrawsError::Parse {
            path: display,
            message: err.to_string(),
        })?;
    DrawsMatrix::from_rows(document.rows)
}

/// Write a draws matrix as a JSON document at `path`. Records the seed when known.
pub fn save_draws(
    matrix: &DrawsMatrix,
    seed: Option<u64>,
    path: impl AsRef<Path>,
) -> Result<(), DrawsError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let document = DrawsDocument {
        data_version: Some("1".to_string()),
        source_note: Some("generated by emax draws".to_string()),
        seed,
        rows: matrix.rows.clone(),
    };
    let payload = serde_json::to_string_pretty(&document).map_err(|err| DrawsError::Parse {
        path: display.clone(),
        message: err.to_string(),
    })?;
    fs::write(path, payload).map_err(|source| DrawsError::Io {
        path: display,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_accepts_rectangular_matrix() {
        let matrix = DrawsMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(matrix.n_draws(), 2);
        assert_eq!(matrix.n_alternatives(), 2);
        assert_eq!(matrix.row(1), &[3.0, 4.0]);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = DrawsMatrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, DrawsError::Shape { .. }));
    }

    #[test]
    fn from_rows_rejects_empty_matrix() {
        assert!(DrawsMatrix::from_rows(Vec::new()).is_err());
        assert!(DrawsMatrix::from_rows(vec![Vec::new()]).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_draws("definitely/not/here.json").unwrap_err();
        assert!(matches!(err, DrawsError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here.json"));
    }
}
