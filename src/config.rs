//! Evaluation settings.
//!
//! Everything has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! { "top_n": 3, "limits": { "max_paths": 10000 },
//!   "fuzzy": { "carbon_weight": 0.7, "cost_weight": 0.3,
//!              "t_norm": { "kind": "hamacher_generic", "p": 0.25 } } }
//! ```

use serde::{Deserialize, Serialize};

use crate::fuzzy::{TNorm, Weights};
use crate::graph::EnumerationLimits;
use crate::model::{END, STARTER};
use crate::ranking::DEFAULT_TOP_N;
use crate::Result;

/// Settings for a ranking run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// Name of the node routes start from.
    pub start: String,
    /// Name of the node routes end at.
    pub end: String,
    /// How many routes `top` returns.
    pub top_n: usize,
    pub limits: EnumerationLimits,
    pub fuzzy: FuzzyConfig,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            start: STARTER.to_string(),
            end: END.to_string(),
            top_n: DEFAULT_TOP_N,
            limits: EnumerationLimits::unlimited(),
            fuzzy: FuzzyConfig::default(),
        }
    }
}

impl EvaluationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.fuzzy.t_norm.validate()?;
        Ok(config)
    }

    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    pub fn with_limits(mut self, limits: EnumerationLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_fuzzy(mut self, fuzzy: FuzzyConfig) -> Self {
        self.fuzzy = fuzzy;
        self
    }
}

/// Settings for stage scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    pub carbon_weight: f64,
    pub cost_weight: f64,
    pub t_norm: TNorm,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        let weights = Weights::default();
        Self { carbon_weight: weights.carbon, cost_weight: weights.cost, t_norm: TNorm::Algebraic }
    }
}

impl FuzzyConfig {
    pub fn weights(&self) -> Weights {
        Weights { carbon: self.carbon_weight, cost: self.cost_weight }
    }
}
