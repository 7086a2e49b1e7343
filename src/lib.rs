//! # carbon-route — Process-Flow Emissions Ranking
//!
//! Ranks every feasible route through a process-flow diagram by total carbon
//! emissions, and scores single stages on a joint carbon/investment fuzzy
//! measure.
//!
//! ## Design Principles
//!
//! 1. **Graph is immutable per run**: the editor submits a whole description,
//!    `FlowGraph::build` validates it once, nothing mutates it afterwards
//! 2. **Trait at the data seam**: `FactorSource` is the contract between the
//!    ranking core and wherever emission factors come from
//! 3. **Pure core**: enumeration, aggregation, ranking and fuzzy scoring do
//!    no I/O and touch no shared state
//! 4. **Closed choices are enums**: node roles and t-norms are tagged variants,
//!    only string parsing at the boundary can fail
//!
//! ## Quick Start
//!
//! ```rust
//! use carbon_route::{Evaluator, FlowGraph, Node, Edge};
//!
//! # fn example() -> carbon_route::Result<()> {
//! let graph = FlowGraph::build(
//!     vec![
//!         Node::starter(),
//!         Node::end(),
//!         Node::normal("Pump", "kWh (Electricidad)", 50.0),
//!         Node::normal("Boiler", "L (Diesel)", 10.0),
//!     ],
//!     vec![
//!         Edge::new("starter", "Pump"),
//!         Edge::new("Pump", "Boiler"),
//!         Edge::new("Boiler", "end"),
//!     ],
//! )?;
//!
//! let evaluator = Evaluator::new();
//! for (i, route) in evaluator.top(&graph).iter().enumerate() {
//!     println!("{}. {} ({:.2})", i + 1, route.path, route.total_emissions);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Role |
//! |--------|------|
//! | `model` | Nodes, edges, paths, editor document |
//! | `graph` | Validated flow graph and simple-path enumeration |
//! | `emissions` | Emission factor table and per-path totals |
//! | `ranking` | Sorting routes and the top-N view |
//! | `fuzzy` | Membership functions and t-norm scoring |
//! | `export` | Report table / JSON rendering |
//! | `config` | Run settings |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod graph;
pub mod emissions;
pub mod ranking;
pub mod fuzzy;
pub mod export;
pub mod config;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Node, NodeRole, SpecialRole, Bounds, Edge, Path,
    GraphDescription, STARTER, END,
};

// ============================================================================
// Re-exports: Core
// ============================================================================

pub use graph::{FlowGraph, Enumeration, EnumerationLimits, enumerate_paths, enumerate_paths_with};
pub use emissions::{FactorSource, EmissionFactorTable, emissions_of, node_emissions};
pub use ranking::{RankedPath, Ranking, rank, rank_default, rank_with_limits, top_n, DEFAULT_TOP_N};
pub use fuzzy::{
    TNorm, Criterion, Criteria, Alternative, Evaluation, Weights,
    membership, growth_beta, evaluate, evaluate_carbon_investment,
};
pub use config::{EvaluationConfig, FuzzyConfig};

// ============================================================================
// Top-level Evaluator handle
// ============================================================================

/// The primary entry point. An `Evaluator` pairs a factor source with run
/// settings and runs rankings and stage scores against submitted graphs.
#[derive(Debug, Clone)]
pub struct Evaluator<F: FactorSource = EmissionFactorTable> {
    factors: F,
    config: EvaluationConfig,
}

impl Evaluator<EmissionFactorTable> {
    /// Evaluator over the built-in factor table with default settings.
    pub fn new() -> Self {
        Self::with_factors(EmissionFactorTable::default())
    }
}

impl Default for Evaluator<EmissionFactorTable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FactorSource> Evaluator<F> {
    /// Evaluator over a custom factor source.
    pub fn with_factors(factors: F) -> Self {
        Self { factors, config: EvaluationConfig::default() }
    }

    pub fn with_config(mut self, config: EvaluationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn factors(&self) -> &F {
        &self.factors
    }

    /// Rank all routes between the configured endpoints.
    pub fn rank(&self, graph: &FlowGraph) -> Ranking {
        rank_with_limits(graph, &self.factors, &self.config.start, &self.config.end, self.config.limits)
    }

    /// The configured top-N routes.
    pub fn top(&self, graph: &FlowGraph) -> Vec<RankedPath> {
        let ranking = self.rank(graph);
        top_n(&ranking.paths, self.config.top_n).to_vec()
    }

    /// Parse an editor document, build its graph and rank it.
    pub fn rank_description(&self, json: &str) -> Result<Ranking> {
        let graph = GraphDescription::from_json(json)?.to_graph()?;
        Ok(self.rank(&graph))
    }

    /// Fuzzy score of one stage with the configured weights and t-norm.
    pub fn score_stage(&self, graph: &FlowGraph, name: &str) -> Result<Evaluation> {
        let node = graph
            .node(name)
            .ok_or_else(|| Error::InvalidArgument(format!("no stage named '{name}'")))?;
        let fuzzy = &self.config.fuzzy;
        fuzzy::evaluate_stage(node, &self.factors, fuzzy.weights(), fuzzy.t_norm)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
