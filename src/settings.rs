//! Settings for the branch-and-price search.
//!
//! Every section and key is optional; missing values fall back to the defaults
//! listed on each field.
//!
//! ```
//! use bnp2d::Settings;
//!
//! let settings = Settings::from_toml_str(r#"
//!     [pricing]
//!     max_rounds = 50
//!
//!     [search]
//!     node_limit = 100
//! "#).unwrap();
//!
//! assert_eq!(settings.pricing.max_rounds, 50);
//! assert_eq!(settings.pricing.break_even, 1.0);
//! assert_eq!(settings.search.node_limit, Some(100));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::BnpResult;

/// All settings of a branch-and-price run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Column generation settings.
    pub pricing: PricingSettings,
    /// Tree search settings.
    pub search: SearchSettings,
    /// Solver backend settings.
    pub solver: SolverSettings,
}

impl Settings {
    /// Parses settings from a TOML string.
    pub fn from_toml_str(s: &str) -> BnpResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Loads settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> BnpResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Column generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Outer pricing objective above which no column is generated. Default `1.0`.
    pub break_even: f64,
    /// Maximum number of pricing rounds per node. Default `200`.
    pub max_rounds: usize,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            break_even: 1.0,
            max_rounds: 200,
        }
    }
}

/// Tree search settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum number of nodes to process. Default: unlimited.
    pub node_limit: Option<usize>,
    /// Integrality and bound comparison tolerance. Default `1e-6`.
    pub tolerance: f64,
    /// Discard nodes whose master value, rounded up, cannot beat the incumbent.
    ///
    /// Column generation stops on the break-even and admission rules, which
    /// can leave improving columns unpriced, so the master value of a node is
    /// not always a lower bound on what its subtree contains. Default `false`.
    pub prune_by_bound: bool,
}

impl Default for SearchSettings {
    fn default() -> Self {
        SearchSettings {
            node_limit: None,
            tolerance: 1e-6,
            prune_by_bound: false,
        }
    }
}

/// Settings passed to the SCIP backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Silence SCIP's console output. Default `true`.
    pub quiet: bool,
    /// Time limit in seconds for a single solve. Default: none.
    pub time_limit: Option<f64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            quiet: true,
            time_limit: None,
        }
    }
}
