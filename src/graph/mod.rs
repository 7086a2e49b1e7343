//! # Flow Graph
//!
//! The immutable directed graph a single evaluation run works on.
//! Built once from a node list and an edge list, read-only afterwards:
//! the editor rebuilds and resubmits the whole graph for every run.
//!
//! Nodes are stored densely and addressed by index internally; the public
//! API stays name-based because edges reference nodes by name.

pub mod paths;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{Edge, Node, SpecialRole, END, STARTER};
use crate::{Error, Result};

pub use paths::{enumerate_paths, enumerate_paths_with, Enumeration, EnumerationLimits};

/// Successor list. Flow diagrams rarely branch more than a few ways.
pub(crate) type Successors = SmallVec<[usize; 4]>;

// ============================================================================
// FlowGraph
// ============================================================================

/// Directed process-flow graph with exactly one `starter` and one `end`.
#[derive(Debug, Clone)]
pub struct FlowGraph {
    nodes: Vec<Node>,
    /// name → index into `nodes`
    index: HashMap<String, usize>,
    /// index → successor indices, in edge insertion order
    adjacency: Vec<Successors>,
    edge_count: usize,
}

impl FlowGraph {
    /// Validate and build a graph.
    ///
    /// Fails with [`Error::Validation`] when a node name is duplicated, when
    /// there is not exactly one `starter` and one `end` special node, when a
    /// quantity is negative or NaN, when an edge references an unknown node,
    /// or when an edge is a self-loop.
    pub fn build(
        nodes: impl IntoIterator<Item = Node>,
        edges: impl IntoIterator<Item = Edge>,
    ) -> Result<Self> {
        let nodes: Vec<Node> = nodes.into_iter().collect();

        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.name.clone(), i).is_some() {
                return Err(Error::Validation(format!("duplicate node name '{}'", node.name)));
            }
        }

        for role in [SpecialRole::Starter, SpecialRole::End] {
            let count = nodes.iter().filter(|n| n.special_role() == Some(role)).count();
            if count != 1 {
                return Err(Error::Validation(format!(
                    "expected exactly one '{}' node, found {count}",
                    role.name()
                )));
            }
        }
        if let Some(node) = nodes.iter().find(|n| n.quantity.is_nan() || n.quantity < 0.0) {
            return Err(Error::Validation(format!(
                "node '{}' has invalid quantity {}",
                node.name, node.quantity
            )));
        }
        for name in [STARTER, END] {
            let is_special = index.get(name).is_some_and(|&i| nodes[i].is_special());
            if !is_special {
                return Err(Error::Validation(format!("node '{name}' must be special")));
            }
        }

        let mut adjacency: Vec<Successors> = vec![Successors::new(); nodes.len()];
        let mut edge_count = 0;
        for edge in edges {
            if edge.is_self_loop() {
                return Err(Error::Validation(format!("self-loop on node '{}'", edge.source)));
            }
            let src = *index.get(edge.source.as_str()).ok_or_else(|| {
                Error::Validation(format!("edge source '{}' is not a node", edge.source))
            })?;
            let dst = *index.get(edge.target.as_str()).ok_or_else(|| {
                Error::Validation(format!("edge target '{}' is not a node", edge.target))
            })?;
            // Parallel edges add no new route.
            if !adjacency[src].contains(&dst) {
                adjacency[src].push(dst);
                edge_count += 1;
            }
        }

        debug!(nodes = nodes.len(), edges = edge_count, "flow graph built");

        Ok(Self { nodes, index, adjacency, edge_count })
    }

    /// Successor names of `name`, in edge order. Empty for unknown or
    /// terminal nodes.
    pub fn adjacency(&self, name: &str) -> Vec<&str> {
        self.successors(name).collect()
    }

    /// Iterator form of [`FlowGraph::adjacency`].
    pub fn successors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + use<'a> {
        let succ: &[usize] = self
            .index
            .get(name)
            .map(|&i| self.adjacency[i].as_slice())
            .unwrap_or(&[]);
        succ.iter().map(move |&j| self.nodes[j].name.as_str())
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.index.get(name).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Every distinct edge, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().enumerate().flat_map(move |(i, succ)| {
            succ.iter()
                .map(move |&j| Edge::new(self.nodes[i].name.clone(), self.nodes[j].name.clone()))
        })
    }

    pub fn starter(&self) -> &Node {
        &self.nodes[self.index[STARTER]]
    }

    pub fn end(&self) -> &Node {
        &self.nodes[self.index[END]]
    }

    // ------------------------------------------------------------------------
    // Index-level access for the enumerator
    // ------------------------------------------------------------------------

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub(crate) fn successor_indices(&self, idx: usize) -> &[usize] {
        &self.adjacency[idx]
    }

    pub(crate) fn name_at(&self, idx: usize) -> &str {
        &self.nodes[idx].name
    }
}

// ============================================================================
// Tests
// ============================================================================
