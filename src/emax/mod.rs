pub mod integrate;
pub mod utility;

pub use integrate::{
    calculate_expected_value_functions, evaluate_scenario, evaluate_scenario_parallel,
    EvaluationError, EvaluationSummary,
};
pub use utility::{flow_utility, value_function};
