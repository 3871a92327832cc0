//! Run the expected value integration once sequentially and once in parallel,
//! then print timings and speedup.
//!
//! Usage: cargo run --release --bin benchmark_parallel_speedup

use std::time::Instant;

use emax::draws::generate::generate_draws;
use emax::emax::integrate::{evaluate_scenario, evaluate_scenario_parallel};
use emax::model::scenario::example_scenario;

fn main() {
    let seed = 12345u64;
    let n_draws = 2_000_000;

    let scenario = example_scenario();
    let draws = generate_draws(n_draws, &scenario.shock_columns(), seed);

    println!(
        "Expected value integration: {} draws x {} alternatives (seed={})",
        draws.n_draws(),
        draws.n_alternatives(),
        seed
    );
    println!();

    // Sequential
    let t0 = Instant::now();
    let sequential = evaluate_scenario(&scenario, &draws).expect("sequential evaluation");
    let elapsed_seq = t0.elapsed();
    let seq_ms = elapsed_seq.as_secs_f64() * 1000.0;
    println!(
        "Sequential:  {:.2} ms  ({:.1} draws/s)",
        seq_ms,
        n_draws as f64 / elapsed_seq.as_secs_f64()
    );

    // Parallel
    let t0 = Instant::now();
    let parallel = evaluate_scenario_parallel(&scenario, &draws).expect("parallel evaluation");
    let elapsed_par = t0.elapsed();
    let par_ms = elapsed_par.as_secs_f64() * 1000.0;
    println!(
        "Parallel:    {:.2} ms  ({:.1} draws/s)",
        par_ms,
        n_draws as f64 / elapsed_par.as_secs_f64()
    );

    let speedup = seq_ms / par_ms;
    println!();
    println!("Speedup:     {speedup:.2}x faster (parallel vs sequential)");
    println!("Expected value: {}", sequential.expected_value);

    assert_eq!(
        sequential.expected_value.to_bits(),
        parallel.expected_value.to_bits(),
        "parallel result must match sequential bitwise"
    );
    println!("(Results match sequential vs parallel)");
}
