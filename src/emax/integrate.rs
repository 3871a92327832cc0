//! Monte Carlo integration of the expected value function: average over shock
//! draws of the maximum value function across alternatives.
//!
//! Both paths batch the draw rows with [crate::parallel::batch_ranges] and
//! combine per-batch partial sums in batch order, so the parallel result is
//! bitwise identical to the sequential one regardless of thread count.

use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::draws::matrix::DrawsMatrix;
use crate::emax::utility::value_function;
use crate::model::scenario::Scenario;
use crate::parallel::batch_ranges;

/// Number of row batches for the deterministic partial-sum layout.
const INTEGRATION_BATCH_COUNT: usize = 64;

/// Full evaluation output: the integral plus the per-alternative shares of
/// draws on which each alternative attains the maximum.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub expected_value: f64,
    pub n_draws: usize,
    pub n_alternatives: usize,
    pub labels: Vec<String>,
    pub choice_probabilities: Vec<f64>,
}

#[derive(Debug)]
pub enum EvaluationError {
    /// Payoff vectors and draw columns disagree on the number of alternatives.
    DimensionMismatch { message: String },
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DimensionMismatch { message } => write!(f, "dimension mismatch: {message}"),
        }
    }
}

impl std::error::Error for EvaluationError {}

/// Expected value of the maximum value function, integrated over `draws`.
///
/// The three payoff slices are parallel (entry `j` describes alternative `j`)
/// and must match the draw column count.
pub fn calculate_expected_value_functions(
    wages: &[f64],
    nonpecs: &[f64],
    continuation_values: &[f64],
    draws: &DrawsMatrix,
    delta: f64,
) -> Result<f64, EvaluationError> {
    let (value_sum, _) =
        integrate(wages, nonpecs, continuation_values, draws, delta, false)?;
    Ok(value_sum / draws.n_draws() as f64)
}

pub fn evaluate_scenario(
    scenario: &Scenario,
    draws: &DrawsMatrix,
) -> Result<EvaluationSummary, EvaluationError> {
    evaluate_with_parallelism(scenario, draws, false)
}

/// Like [evaluate_scenario] but distributes draw batches across all CPU cores
/// via Rayon. Use for large draw files. Result is identical to sequential.
pub fn evaluate_scenario_parallel(
    scenario: &Scenario,
    draws: &DrawsMatrix,
) -> Result<EvaluationSummary, EvaluationError> {
    evaluate_with_parallelism(scenario, draws, true)
}

fn evaluate_with_parallelism(
    scenario: &Scenario,
    draws: &DrawsMatrix,
    parallel: bool,
) -> Result<EvaluationSummary, EvaluationError> {
    let (value_sum, best_counts) = integrate(
        &scenario.wages,
        &scenario.nonpecs,
        &scenario.continuation_values,
        draws,
        scenario.delta,
        parallel,
    )?;

    let n_draws = draws.n_draws();
    let choice_probabilities = best_counts
        .iter()
        .map(|count| *count as f64 / n_draws as f64)
        .collect();
    let labels = (0..scenario.n_alternatives())
        .map(|index| scenario.label(index))
        .collect();

    Ok(EvaluationSummary {
        expected_value: value_sum / n_draws as f64,
        n_draws,
        n_alternatives: scenario.n_alternatives(),
        labels,
        choice_probabilities,
    })
}

/// Partial results for one batch of draw rows.
struct BatchAccumulator {
    value_sum: f64,
    best_counts: Vec<usize>,
}

fn integrate(
    wages: &[f64],
    nonpecs: &[f64],
    continuation_values: &[f64],
    draws: &DrawsMatrix,
    delta: f64,
    parallel: bool,
) -> Result<(f64, Vec<usize>), EvaluationError> {
    let n_alternatives = wages.len();
    check_parallel_lengths(n_alternatives, nonpecs.len(), "nonpecs")?;
    check_parallel_lengths(n_alternatives, continuation_values.len(), "continuation_values")?;
    check_parallel_lengths(n_alternatives, draws.n_alternatives(), "draw columns")?;
    if n_alternatives == 0 {
        return Err(EvaluationError::DimensionMismatch {
            message: "no alternatives".to_string(),
        });
    }

    let run_batch = |range: &(usize, usize)| {
        let (start, end) = *range;
        let mut accumulator = BatchAccumulator {
            value_sum: 0.0,
            best_counts: vec![0; n_alternatives],
        };
        for row in &draws.rows()[start..end] {
            let mut best_index = 0;
            let mut best_value = value_function(
                wages[0],
                nonpecs[0],
                continuation_values[0],
                row[0],
                delta,
            );
            for index in 1..n_alternatives {
                let value = value_function(
                    wages[index],
                    nonpecs[index],
                    continuation_values[index],
                    row[index],
                    delta,
                );
                if value > best_value {
                    best_value = value;
                    best_index = index;
                }
            }
            accumulator.value_sum += best_value;
            accumulator.best_counts[best_index] += 1;
        }
        accumulator
    };

    let ranges = batch_ranges(draws.n_draws(), INTEGRATION_BATCH_COUNT);
    let batches: Vec<BatchAccumulator> = if parallel {
        ranges.par_iter().map(run_batch).collect()
    } else {
        ranges.iter().map(run_batch).collect()
    };

    let mut value_sum = 0.0;
    let mut best_counts = vec![0usize; n_alternatives];
    for batch in batches {
        value_sum += batch.value_sum;
        for (total, count) in best_counts.iter_mut().zip(batch.best_counts) {
            *total += count;
        }
    }
    Ok((value_sum, best_counts))
}

fn check_parallel_lengths(
    expected: usize,
    actual: usize,
    what: &str,
) -> Result<(), EvaluationError> {
    if expected != actual {
        return Err(EvaluationError::DimensionMismatch {
            message: format!("wages has {expected} entries but {what} has {actual}"),
        });
    }
    Ok(())
}
