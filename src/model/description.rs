//! GraphDescription — the document the flow editor submits for evaluation.
//!
//! The editor serializes its canvas as JSON:
//!
//! ```text
//! { "nodes": [ { "name": "A", "type": "normal", "energy_type": "L (Diesel)",
//!                "quantity": 10.0, "co2_limits": [0, 50], "inv_limits": [0, 1e5],
//!                "position": [120.0, 80.0] }, ... ],
//!   "edges": [ { "source": "starter", "target": "A", "direction": "unidirectional" }, ... ] }
//! ```
//!
//! Display-only fields (`position`, `direction`) are accepted and ignored.

use serde::{Deserialize, Serialize};

use super::{Bounds, Edge, Node, NodeRole, SpecialRole};
use crate::graph::FlowGraph;
use crate::{Error, Result};

/// Node kind as the editor labels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Special,
    Normal,
}

fn default_energy_type() -> String {
    "N/A".to_string()
}

fn default_direction() -> String {
    "unidirectional".to_string()
}

/// One node entry of the editor document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default = "default_energy_type")]
    pub energy_type: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub co2_limits: [f64; 2],
    #[serde(default)]
    pub inv_limits: [f64; 2],
    #[serde(default, alias = "inversion")]
    pub investment: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<(f64, f64)>,
    #[serde(default)]
    pub description: String,
}

/// One edge entry of the editor document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDescription {
    pub source: String,
    pub target: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

/// The whole editor document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GraphDescription {
    #[serde(default)]
    pub nodes: Vec<NodeDescription>,
    #[serde(default)]
    pub edges: Vec<EdgeDescription>,
}

impl NodeDescription {
    /// Convert to a core `Node`, resolving the role from kind + reserved name.
    ///
    /// A `special` node must be named `starter` or `end`, and those two names
    /// may only be used by `special` nodes.
    pub fn to_node(&self) -> Result<Node> {
        let role = match (self.kind, SpecialRole::for_name(&self.name)) {
            (NodeKind::Special, Some(role)) => NodeRole::Special(role),
            (NodeKind::Normal, None) => NodeRole::Normal,
            (NodeKind::Special, None) => {
                return Err(Error::Validation(format!(
                    "special node '{}' must be named 'starter' or 'end'",
                    self.name
                )));
            }
            (NodeKind::Normal, Some(_)) => {
                return Err(Error::Validation(format!(
                    "node '{}' uses a reserved name but is not special",
                    self.name
                )));
            }
        };

        Ok(Node {
            name: self.name.clone(),
            role,
            energy_type: self.energy_type.clone(),
            quantity: self.quantity,
            co2: Bounds::new(self.co2_limits[0], self.co2_limits[1]),
            investment_bounds: Bounds::new(self.inv_limits[0], self.inv_limits[1]),
            investment: self.investment,
            description: self.description.clone(),
        })
    }
}

impl EdgeDescription {
    pub fn to_edge(&self) -> Edge {
        Edge::new(self.source.clone(), self.target.clone())
    }
}

impl GraphDescription {
    /// Parse an editor document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and build the flow graph described by this document.
    pub fn to_graph(&self) -> Result<FlowGraph> {
        let nodes = self
            .nodes
            .iter()
            .map(NodeDescription::to_node)
            .collect::<Result<Vec<_>>>()?;
        let edges = self.edges.iter().map(EdgeDescription::to_edge).collect::<Vec<_>>();
        FlowGraph::build(nodes, edges)
    }
}
