//! Scenario and draws validation. Produces a severity-tagged diagnostic report
//! instead of failing on the first problem, so a bad fixture can be fixed in
//! one pass.

use std::fmt;

use crate::draws::matrix::DrawsMatrix;
use crate::model::scenario::Scenario;

/// Draw counts below this make the Monte Carlo average noisy.
const SMALL_SAMPLE_THRESHOLD: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationSeverity {
    Error,
    Warning,
    Info,
}

impl ValidationSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for ValidationSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationDiagnostic {
    pub severity: ValidationSeverity,
    pub context: String,
    pub message: String,
}

impl fmt::Display for ValidationDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.context, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    pub fn push(
        &mut self,
        severity: ValidationSeverity,
        context: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.diagnostics.push(ValidationDiagnostic {
            severity,
            context: context.into(),
            message: message.into(),
        });
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|diag| diag.severity == ValidationSeverity::Error)
    }
}

/// Check a scenario in isolation: vector lengths, finiteness, discount range.
pub fn validate_scenario(scenario: &Scenario) -> ValidationReport {
    let mut report = ValidationReport::default();
    let n = scenario.n_alternatives();

    if n == 0 {
        report.push(
            ValidationSeverity::Error,
            "wages",
            "scenario has no alternatives",
        );
        return report;
    }

    check_parallel_length(&mut report, "nonpecs", scenario.nonpecs.len(), n);
    check_parallel_length(
        &mut report,
        "continuation_values",
        scenario.continuation_values.len(),
        n,
    );
    if let Some(flags) = &scenario.wage_shock {
        check_parallel_length(&mut report, "wage_shock", flags.len(), n);
    }
    if let Some(sds) = &scenario.shock_sds {
        check_parallel_length(&mut report, "shock_sds", sds.len(), n);
        for (index, sd) in sds.iter().enumerate() {
            if *sd < 0.0 || !sd.is_finite() {
                report.push(
                    ValidationSeverity::Error,
                    "shock_sds",
                    format!("entry {index} is {sd}, must be finite and non-negative"),
                );
            }
        }
    }
    if let Some(labels) = &scenario.labels {
        check_parallel_length(&mut report, "labels", labels.len(), n);
    }

    check_finite(&mut report, "wages", &scenario.wages);
    check_finite(&mut report, "nonpecs", &scenario.nonpecs);
    check_finite(&mut report, "continuation_values", &scenario.continuation_values);

    if !scenario.delta.is_finite() || scenario.delta <= 0.0 || scenario.delta > 1.0 {
        report.push(
            ValidationSeverity::Error,
            "delta",
            format!("discount factor {} is outside (0, 1]", scenario.delta),
        );
    } else if scenario.delta == 1.0 {
        report.push(
            ValidationSeverity::Info,
            "delta",
            "discount factor is exactly 1.0 (no discounting)",
        );
    }

    report
}

/// Check a scenario against the draws it will be integrated over.
pub fn validate_scenario_with_draws(scenario: &Scenario, draws: &DrawsMatrix) -> ValidationReport {
    let mut report = validate_scenario(scenario);

    if draws.n_alternatives() != scenario.n_alternatives() {
        report.push(
            ValidationSeverity::Error,
            "draws",
            format!(
                "draws have {} columns but the scenario has {} alternatives",
                draws.n_alternatives(),
                scenario.n_alternatives()
            ),
        );
        return report;
    }

    if draws.n_draws() < SMALL_SAMPLE_THRESHOLD {
        report.push(
            ValidationSeverity::Warning,
            "draws",
            format!(
                "only {} draw rows; the Monte Carlo average will be noisy",
                draws.n_draws()
            ),
        );
    }

    for row in draws.rows() {
        for value in row {
            if !value.is_finite() {
                report.push(
                    ValidationSeverity::Error,
                    "draws",
                    "draws contain non-finite values",
                );
                return report;
            }
        }
    }

    // A wage alternative multiplies its wage by the draw, so nonpositive
    // columns usually mean additive draws were supplied by mistake. An
    // overlong wage_shock vector is already reported above; only flags with
    // a matching draw column are inspected.
    let flags = scenario.wage_shock_flags();
    for (index, is_wage) in flags.iter().take(draws.n_alternatives()).enumerate() {
        if !is_wage {
            continue;
        }
        let nonpositive = draws.rows().iter().any(|row| row[index] <= 0.0);
        if nonpositive {
            report.push(
                ValidationSeverity::Warning,
                "draws",
                format!(
                    "column {} ({}) has nonpositive draws for a wage alternative",
                    index + 1,
                    scenario.label(index)
                ),
            );
        }
    }

    report
}

fn check_parallel_length(
    report: &mut ValidationReport,
    context: &str,
    actual: usize,
    expected: usize,
) {
    if actual != expected {
        report.push(
            ValidationSeverity::Error,
            context,
            format!("has {actual} entries but wages has {expected}"),
        );
    }
}

fn check_finite(report: &mut ValidationReport, context: &str, values: &[f64]) {
    for (index, value) in values.iter().enumerate() {
        if !value.is_finite() {
            report.push(
                ValidationSeverity::Error,
                context,
                format!("entry {index} is {value}, must be finite"),
            );
        }
    }
}
