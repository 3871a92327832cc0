use std::path::Path;

use crate::draws::csv_io::{export_draws_csv, import_draws_csv};
use crate::draws::generate::generate_draws;
use crate::draws::matrix::{load_draws, save_draws, DrawsError, DrawsMatrix, DEFAULT_DRAWS_PATH};
use crate::draws::rng::Rng;
use crate::emax::integrate::evaluate_scenario;
use crate::model::scenario::{example_scenario, load_scenario, Scenario};
use crate::model::validate::validate_scenario_with_draws;
use crate::parallel::{evaluate_on_pool, WorkerPool};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Evaluate,
    Draws,
    Validate,
    Export,
}

pub fn parse_command(args: &[String]) -> Option<Command> {
    match args.get(1).map(String::as_str) {
        Some("evaluate") => Some(Command::Evaluate),
        Some("draws") => Some(Command::Draws),
        Some("validate") => Some(Command::Validate),
        Some("export") => Some(Command::Export),
        _ => None,
    }
}

pub fn run_with_args(args: &[String]) -> i32 {
    match parse_command(args) {
        Some(Command::Evaluate) => handle_evaluate(args),
        Some(Command::Draws) => handle_draws(args),
        Some(Command::Validate) => handle_validate(args),
        Some(Command::Export) => handle_export(args),
        None => {
            eprintln!("usage: emax <evaluate|draws|validate|export>");
            2
        }
    }
}

/// Load the scenario at `path`, or the built-in example when no path is given.
fn resolve_scenario(path: Option<&String>) -> Result<Scenario, i32> {
    match path {
        Some(path) => load_scenario(path).map_err(|err| {
            eprintln!("{err}");
            1
        }),
        None => Ok(example_scenario()),
    }
}

/// Load draws from JSON or, when the extension is .csv, from CSV.
fn load_draws_any(path: &str) -> Result<DrawsMatrix, DrawsError> {
    let is_csv = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        import_draws_csv(path)
    } else {
        load_draws(path)
    }
}

fn handle_evaluate(args: &[String]) -> i32 {
    let mut positional: Vec<&String> = Vec::new();
    let mut as_json = false;
    let mut parallel = false;
    let mut workers = 0usize;

    let mut iter = args[2..].iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => as_json = true,
            "--parallel" => parallel = true,
            "--workers" => {
                let Some(value) = iter.next() else {
                    eprintln!(
                        "usage: emax evaluate [scenario] [draws] [--json] [--parallel] [--workers n]"
                    );
                    return 2;
                };
                match value.parse::<usize>() {
                    Ok(n) => {
                        workers = n;
                        parallel = true;
                    }
                    Err(_) => {
                        eprintln!("invalid workers '{value}'");
                        return 2;
                    }
                }
            }
            _ => positional.push(arg),
        }
    }

    let scenario = match resolve_scenario(positional.first().copied()) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };
    let draws_path = positional
        .get(1)
        .map(|path| path.as_str())
        .unwrap_or(DEFAULT_DRAWS_PATH);
    let draws = match load_draws_any(draws_path) {
        Ok(draws) => draws,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let report = validate_scenario_with_draws(&scenario, &draws);
    if report.has_errors() {
        eprintln!("invalid inputs: {} issue(s)", report.diagnostics.len());
        for diagnostic in &report.diagnostics {
            eprintln!("- {diagnostic}");
        }
        return 1;
    }

    let result = if parallel {
        evaluate_on_pool(&scenario, &draws, &WorkerPool::with_workers(workers))
    } else {
        evaluate_scenario(&scenario, &draws)
    };
    let summary = match result {
        Ok(summary) => summary,
        Err(err) => {
            eprintln!("evaluation failed: {err}");
            return 1;
        }
    };

    if as_json {
        match serde_json::to_string_pretty(&summary) {
            Ok(payload) => println!("{payload}"),
            Err(err) => {
                eprintln!("failed to serialize evaluation result: {err}");
                return 1;
            }
        }
    } else {
        println!("{}", summary.expected_value);
    }

    0
}

fn handle_draws(args: &[String]) -> i32 {
    let Some(out_path) = args.get(2) else {
        eprintln!("usage: emax draws <out.json> [n_draws] [seed] [scenario-path]");
        return 2;
    };
    let n_draws = parse_usize_arg(args.get(3), "n_draws", 1000).max(1);
    let seed = match args.get(4) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                eprintln!("invalid seed '{raw}'");
                return 2;
            }
        },
        None => Rng::from_entropy().next_u64(),
    };
    let scenario = match resolve_scenario(args.get(5)) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };

    let matrix = generate_draws(n_draws, &scenario.shock_columns(), seed);
    match save_draws(&matrix, Some(seed), out_path) {
        Ok(()) => {
            println!(
                "wrote {} draws x {} alternatives to {} (seed {})",
                matrix.n_draws(),
                matrix.n_alternatives(),
                out_path,
                seed
            );
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn handle_validate(args: &[String]) -> i32 {
    let scenario = match resolve_scenario(args.get(2)) {
        Ok(scenario) => scenario,
        Err(code) => return code,
    };
    let draws_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or(DEFAULT_DRAWS_PATH);
    let draws = match load_draws_any(draws_path) {
        Ok(draws) => draws,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let report = validate_scenario_with_draws(&scenario, &draws);
    for diagnostic in &report.diagnostics {
        eprintln!("- {diagnostic}");
    }
    if report.has_errors() {
        eprintln!("validation failed: {} issue(s)", report.diagnostics.len());
        1
    } else {
        println!("validation passed: {draws_path}");
        0
    }
}

fn handle_export(args: &[String]) -> i32 {
    let (Some(in_path), Some(out_path)) = (args.get(2), args.get(3)) else {
        eprintln!("usage: emax export <draws.json> <out.csv>");
        return 2;
    };

    let draws = match load_draws(in_path) {
        Ok(draws) => draws,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };
    match export_draws_csv(&draws, out_path) {
        Ok(()) => {
            println!(
                "exported {} draws x {} alternatives to {}",
                draws.n_draws(),
                draws.n_alternatives(),
                out_path
            );
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn parse_usize_arg(raw: Option<&String>, name: &str, default: usize) -> usize {
    raw.and_then(|value| value.parse::<usize>().ok())
        .unwrap_or_else(|| {
            if let Some(value) = raw {
                eprintln!("invalid {name} '{value}', defaulting to {default}");
            }
            default
        })
}
