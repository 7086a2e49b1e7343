//! Emissions aggregation along a path.
//!
//! A normal stage emits `quantity * factor(energy_type)`; the two special
//! markers emit nothing. Factors come from a [`FactorSource`], by default the
//! fixed [`EmissionFactorTable`] shipped with the crate.
//!
//! Aggregation never fails. An energy type missing from the table
//! contributes zero and is logged, so one bad stage does not abort a ranking
//! run over otherwise valid data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::graph::FlowGraph;
use crate::model::{Node, Path};

/// The reference emission factors (CO2 per unit of energy/fuel).
pub const DEFAULT_EMISSION_FACTORS: [(&str, f64); 8] = [
    ("kWh (Electricidad)", 0.429),
    ("L (Gasolina)", 2.26),
    ("L (Diesel)", 2.69),
    ("L (Bunker)", 3.01),
    ("L (Queroseno)", 2.48),
    ("L (LPG)", 1.61),
    ("L (Gasolina de aviacion)", 2.69),
    ("L (Jet Fuel)", 2.46),
];

// ============================================================================
// FactorSource
// ============================================================================

/// Lookup from energy-type label to emission factor.
pub trait FactorSource {
    /// Factor for `energy_type`, or `None` if the label is unknown.
    fn factor(&self, energy_type: &str) -> Option<f64>;
}

impl<S: std::hash::BuildHasher> FactorSource for HashMap<String, f64, S> {
    fn factor(&self, energy_type: &str) -> Option<f64> {
        self.get(energy_type).copied()
    }
}

impl<S: std::hash::BuildHasher> FactorSource for hashbrown::HashMap<String, f64, S> {
    fn factor(&self, energy_type: &str) -> Option<f64> {
        self.get(energy_type).copied()
    }
}

impl<F: FactorSource + ?Sized> FactorSource for &F {
    fn factor(&self, energy_type: &str) -> Option<f64> {
        (**self).factor(energy_type)
    }
}

// ============================================================================
// EmissionFactorTable
// ============================================================================

/// Fixed table of emission factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionFactorTable {
    entries: Vec<(String, f64)>,
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_EMISSION_FACTORS
                .iter()
                .map(|&(label, factor)| (label.to_string(), factor))
                .collect(),
        }
    }
}

impl EmissionFactorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Energy-type labels, in table order. The editor offers exactly these.
    pub fn energy_types(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FactorSource for EmissionFactorTable {
    fn factor(&self, energy_type: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(label, _)| label == energy_type)
            .map(|&(_, factor)| factor)
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Emissions of a single stage. Zero for special nodes and unknown energy types.
pub fn node_emissions<F: FactorSource + ?Sized>(node: &Node, factors: &F) -> f64 {
    if node.is_special() {
        return 0.0;
    }
    match factors.factor(&node.energy_type) {
        Some(factor) => node.quantity * factor,
        None => {
            warn!(node = %node.name, energy_type = %node.energy_type, "unknown energy type, counted as zero");
            0.0
        }
    }
}

/// Total emissions along `path`. Names not present in `graph` contribute zero.
pub fn emissions_of<F: FactorSource + ?Sized>(path: &Path, graph: &FlowGraph, factors: &F) -> f64 {
    path.nodes()
        .iter()
        .filter_map(|name| graph.node(name))
        .map(|node| node_emissions(node, factors))
        .sum()
}
