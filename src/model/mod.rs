pub mod scenario;
pub mod validate;

pub use scenario::{example_scenario, load_scenario, Scenario, ScenarioError};
pub use validate::{
    validate_scenario, validate_scenario_with_draws, ValidationDiagnostic, ValidationReport,
    ValidationSeverity,
};
