//! Batch distribution for parallel integration.
//!
//! The integrator splits draw rows into a fixed set of batches, sums each
//! batch independently, and combines partial sums in batch order. That keeps
//! the floating-point result independent of how many threads run the batches.

use crate::draws::matrix::DrawsMatrix;
use crate::emax::integrate::{evaluate_scenario_parallel, EvaluationError, EvaluationSummary};
use crate::model::scenario::Scenario;
use crate::parallel::pool::WorkerPool;

/// Split `total` items into up to `num_batches` ranges `[start, end)`.
/// Batches are as equal in size as possible; later batches may be smaller.
///
/// # Example
/// ```
/// # use emax::parallel::batch_ranges;
/// let ranges = batch_ranges(100, 4);
/// assert_eq!(ranges, vec![(0, 25), (25, 50), (50, 75), (75, 100)]);
/// ```
pub fn batch_ranges(total: usize, num_batches: usize) -> Vec<(usize, usize)> {
    if total == 0 || num_batches == 0 {
        return Vec::new();
    }
    let num_batches = num_batches.min(total);
    let base = total / num_batches;
    let remainder = total % num_batches;
    let mut ranges = Vec::with_capacity(num_batches);
    let mut start = 0;
    for i in 0..num_batches {
        let size = base + if i < remainder { 1 } else { 0 };
        let end = start + size;
        ranges.push((start, end));
        start = end;
    }
    ranges
}

/// Run the parallel evaluation on a pool with the given worker count.
/// Convenience wrapper over [WorkerPool::install].
pub fn evaluate_on_pool(
    scenario: &Scenario,
    draws: &DrawsMatrix,
    pool: &WorkerPool,
) -> Result<EvaluationSummary, EvaluationError> {
    pool.install(|| evaluate_scenario_parallel(scenario, draws))
}
