//! All-simple-paths enumeration.
//!
//! Depth-first search with a current-path stack and a visited set scoped to
//! the current branch: a node is marked on entry and unmarked on backtrack,
//! so it may appear on two different branches but never twice on one path.
//! Cycles elsewhere in the graph cannot cause unbounded recursion because
//! the depth is bounded by the node count.
//!
//! ## Scaling limit
//!
//! The search is exhaustive. The number of simple paths, and therefore the
//! running time, is exponential in the number of branching nodes in the
//! worst case. This is fine for hand-built flow diagrams of a few dozen
//! stages. For anything larger, pass [`EnumerationLimits`] and check
//! [`Enumeration::truncated`].
//!
//! Branches that cannot reach `end` at all are skipped up front. Once
//! `max_paths` paths are recorded the walk goes on only until it meets one
//! more path, so `truncated` is never raised for a search that was in fact
//! complete.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::FlowGraph;
use crate::model::Path;

/// Caps on how much work one enumeration may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumerationLimits {
    /// Stop after this many paths have been found.
    pub max_paths: Option<usize>,
    /// Do not extend paths beyond this many nodes (endpoints included).
    pub max_depth: Option<usize>,
}

impl EnumerationLimits {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn max_paths(mut self, n: usize) -> Self {
        self.max_paths = Some(n);
        self
    }

    pub fn max_depth(mut self, n: usize) -> Self {
        self.max_depth = Some(n);
        self
    }
}

/// Paths found by an enumeration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enumeration {
    pub paths: Vec<Path>,
    /// True if a path to `end` exists that is not in `paths`: either one
    /// more path was found past `max_paths`, or a branch that can still
    /// reach `end` was cut at `max_depth`.
    pub truncated: bool,
}

/// Every simple path from `start` to `end`, in depth-first discovery order.
///
/// Returns an empty list when either endpoint is not in the graph. When
/// `start == end` the single-node path is returned.
pub fn enumerate_paths(graph: &FlowGraph, start: &str, end: &str) -> Vec<Path> {
    enumerate_paths_with(graph, start, end, EnumerationLimits::unlimited()).paths
}

/// [`enumerate_paths`] with work limits.
pub fn enumerate_paths_with(
    graph: &FlowGraph,
    start: &str,
    end: &str,
    limits: EnumerationLimits,
) -> Enumeration {
    let (Some(start_idx), Some(end_idx)) = (graph.index_of(start), graph.index_of(end)) else {
        debug!(start, end, "endpoint not in graph, no paths");
        return Enumeration::default();
    };

    let mut walk = Walk {
        graph,
        end: end_idx,
        limits,
        reaches_end: reaches(graph, end_idx),
        path: Vec::with_capacity(graph.node_count()),
        visited: vec![false; graph.node_count()],
        found: Vec::new(),
        truncated: false,
        stopped: false,
    };
    walk.visit(start_idx);

    if walk.truncated {
        warn!(
            start,
            end,
            found = walk.found.len(),
            max_paths = ?limits.max_paths,
            max_depth = ?limits.max_depth,
            "path enumeration truncated"
        );
    } else {
        debug!(start, end, found = walk.found.len(), "path enumeration complete");
    }

    Enumeration { paths: walk.found, truncated: walk.truncated }
}

// ============================================================================
// DFS state
// ============================================================================

/// Nodes from which `end` is reachable at all, by reverse breadth-first
/// search. The walk never descends into the others.
fn reaches(graph: &FlowGraph, end: usize) -> Vec<bool> {
    let n = graph.node_count();
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for src in 0..n {
        for &dst in graph.successor_indices(src) {
            predecessors[dst].push(src);
        }
    }

    let mut seen = vec![false; n];
    seen[end] = true;
    let mut queue = VecDeque::from([end]);
    while let Some(node) = queue.pop_front() {
        for &prev in &predecessors[node] {
            if !seen[prev] {
                seen[prev] = true;
                queue.push_back(prev);
            }
        }
    }
    seen
}

struct Walk<'g> {
    graph: &'g FlowGraph,
    end: usize,
    limits: EnumerationLimits,
    reaches_end: Vec<bool>,
    path: Vec<usize>,
    visited: Vec<bool>,
    found: Vec<Path>,
    truncated: bool,
    /// Set once a path past `max_paths` is seen; unwinds the recursion.
    stopped: bool,
}

impl Walk<'_> {
    fn limit_reached(&self) -> bool {
        self.limits.max_paths.is_some_and(|max| self.found.len() >= max)
    }

    fn record(&mut self) {
        let names = self.path.iter().map(|&i| self.graph.name_at(i).to_string()).collect();
        self.found.push(Path::new(names));
    }

    fn visit(&mut self, node: usize) {
        self.path.push(node);
        self.visited[node] = true;

        if node == self.end {
            if self.limit_reached() {
                self.truncated = true;
                self.stopped = true;
            } else {
                self.record();
            }
        } else {
            let graph = self.graph;
            let at_depth_cap = self.limits.max_depth.is_some_and(|max| self.path.len() >= max);
            for &next in graph.successor_indices(node) {
                if self.stopped {
                    break;
                }
                if self.visited[next] || !self.reaches_end[next] {
                    continue;
                }
                if at_depth_cap {
                    self.truncated = true;
                    break;
                }
                self.visit(next);
            }
        }

        self.path.pop();
        self.visited[node] = false;
    }
}

// ============================================================================
// Tests
// ============================================================================
