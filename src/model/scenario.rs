//! Scenario data: per-alternative payoff inputs for one expected value evaluation.
//! Loaded from JSON or YAML; the built-in example mirrors the classic
//! four-alternative occupational choice setup.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::draws::generate::ColumnShock;

/// Default shock scale for additive (non-wage) columns.
const DEFAULT_ADDITIVE_SD: f64 = 1.0;
/// Default shock scale for lognormal (wage) columns. Kept small so
/// `exp(sd * z)` stays near 1 and wage draws stay in a plausible range.
const DEFAULT_LOGNORMAL_SD: f64 = 0.25;

/// One evaluation scenario (EMAX schema). The three payoff vectors are
/// parallel: entry `j` of each describes alternative `j`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub data_version: Option<String>,
    /// Optional display names, parallel to the payoff vectors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Per-period wage payoff per alternative.
    pub wages: Vec<f64>,
    /// Non-pecuniary utility per alternative.
    pub nonpecs: Vec<f64>,
    /// Discounted future value per alternative.
    pub continuation_values: Vec<f64>,
    /// Discount factor, in (0, 1].
    pub delta: f64,
    /// Which alternatives carry a multiplicative wage shock. When absent,
    /// an alternative is treated as a wage alternative iff its wage is not 1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wage_shock: Option<Vec<bool>>,
    /// Per-alternative shock standard deviations for draw generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shock_sds: Option<Vec<f64>>,
}

#[derive(Debug)]
pub enum ScenarioError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        path: String,
        message: String,
    },
    UnsupportedFormat {
        path: String,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read scenario '{path}': {source}"),
            Self::Parse { path, message } => {
                write!(f, "cannot parse scenario '{path}': {message}")
            }
            Self::UnsupportedFormat { path } => {
                write!(f, "scenario '{path}' must be .json, .yaml or .yml")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

impl Scenario {
    pub fn n_alternatives(&self) -> usize {
        self.wages.len()
    }

    pub fn label(&self, index: usize) -> String {
        self.labels
            .as_ref()
            .and_then(|labels| labels.get(index).cloned())
            .unwrap_or_else(|| format!("alt_{}", index + 1))
    }

    /// Resolved wage-shock flags, explicit or inferred from the wage vector.
    pub fn wage_shock_flags(&self) -> Vec<bool> {
        match &self.wage_shock {
            Some(flags) => flags.clone(),
            None => self.wages.iter().map(|wage| *wage != 1.0).collect(),
        }
    }

    /// Column layout for draw generation matching this scenario.
    pub fn shock_columns(&self) -> Vec<ColumnShock> {
        let flags = self.wage_shock_flags();
        (0..self.n_alternatives())
            .map(|index| {
                let lognormal = flags.get(index).copied().unwrap_or(false);
                let sd = self
                    .shock_sds
                    .as_ref()
                    .and_then(|sds| sds.get(index).copied())
                    .unwrap_or(if lognormal {
                        DEFAULT_LOGNORMAL_SD
                    } else {
                        DEFAULT_ADDITIVE_SD
                    });
                ColumnShock { sd, lognormal }
            })
            .collect()
    }
}

/// The built-in example: two occupations, schooling, and staying home.
pub fn example_scenario() -> Scenario {
    Scenario {
        data_version: Some("1".to_string()),
        labels: Some(vec![
            "occupation_a".to_string(),
            "occupation_b".to_string(),
            "schooling".to_string(),
            "home".to_string(),
        ]),
        wages: vec![1.46178695e4, 9.70115277e3, 1.0, 1.0],
        nonpecs: vec![0.0, 0.0, -4000.0, 17750.0],
        continuation_values: vec![
            359856.620_200_4,
            362415.985_571_73,
            375897.293_035_81,
            353287.244_088_44,
        ],
        delta: 0.95,
        wage_shock: None,
        shock_sds: None,
    }
}

/// Load a scenario from JSON or YAML, dispatching on the file extension.
pub fn load_scenario(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let data = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: display.clone(),
        source,
    })?;

    match extension.as_deref() {
        Some("json") => serde_json::from_str(&data).map_err(|err| ScenarioError::Parse {
            path: display,
            message: err.to_string(),
        }),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&data).map_err(|err| ScenarioError::Parse {
                path: display,
                message: err.to_string(),
            })
        }
        _ => Err(ScenarioError::UnsupportedFormat { path: display }),
    }
}
