//! Seeded generation of shock draw matrices.
//!
//! Wage alternatives receive multiplicative lognormal shocks `exp(sd * z)`,
//! non-wage alternatives additive normal shocks `sd * z`, with `z` standard
//! normal. This matches how draws are pre-transformed before the expected
//! value integration consumes them.

use crate::draws::matrix::DrawsMatrix;
use crate::draws::rng::Rng;

/// Shock distribution for one alternative (one draw column).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnShock {
    pub sd: f64,
    /// When true the column is `exp(sd * z)` (multiplies a wage), otherwise `sd * z`.
    pub lognormal: bool,
}

impl Default for ColumnShock {
    fn default() -> Self {
        Self {
            sd: 1.0,
            lognormal: false,
        }
    }
}

impl ColumnShock {
    pub fn additive(sd: f64) -> Self {
        Self {
            sd,
            lognormal: false,
        }
    }

    pub fn lognormal(sd: f64) -> Self {
        Self { sd, lognormal: true }
    }
}

/// Generate `n_draws` rows with one column per entry of `columns`.
/// Deterministic for a fixed seed and column layout.
///
/// # Panics
/// Panics if `n_draws` is 0 or `columns` is empty.
pub fn generate_draws(n_draws: usize, columns: &[ColumnShock], seed: u64) -> DrawsMatrix {
    assert!(n_draws > 0, "n_draws must be positive");
    assert!(!columns.is_empty(), "at least one draw column is required");
    let mut rng = Rng::new(seed);
    let rows = (0..n_draws)
        .map(|_| {
            columns
                .iter()
                .map(|column| {
                    let shock = column.sd * rng.next_normal();
                    if column.lognormal {
                        shock.exp()
                    } else {
                        shock
                    }
                })
                .collect()
        })
        .collect();
    // Rows are rectangular by construction.
    DrawsMatrix::from_rows(rows).expect("generated rows are rectangular")
}
