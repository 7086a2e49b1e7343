//! Route ranking by total emissions.
//!
//! Enumerate every simple `start → end` path, drop the ones with no
//! intermediate stage (a bare `starter → end` carries nothing to compare),
//! total each remaining path's emissions, and sort ascending by
//! `(total_emissions, intermediate_count)`. Ties on emissions go to the
//! route with fewer stages.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::emissions::{emissions_of, FactorSource};
use crate::graph::{enumerate_paths_with, EnumerationLimits, FlowGraph};
use crate::model::{Path, END, STARTER};

/// Number of routes shown by default.
pub const DEFAULT_TOP_N: usize = 5;

/// One ranked route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPath {
    pub path: Path,
    pub total_emissions: f64,
    pub intermediate_count: usize,
}

impl RankedPath {
    fn cmp_rank(&self, other: &Self) -> Ordering {
        self.total_emissions
            .total_cmp(&other.total_emissions)
            .then(self.intermediate_count.cmp(&other.intermediate_count))
    }
}

/// Result of a limited ranking run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    pub paths: Vec<RankedPath>,
    /// True if enumeration limits cut the search short.
    pub truncated: bool,
}

impl Ranking {
    pub fn top(&self, n: usize) -> &[RankedPath] {
        top_n(&self.paths, n)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Rank every route between `start` and `end`.
///
/// Returns an empty list when no route has an intermediate stage; that is
/// a normal outcome, not an error.
pub fn rank<F: FactorSource + ?Sized>(
    graph: &FlowGraph,
    factors: &F,
    start: &str,
    end: &str,
) -> Vec<RankedPath> {
    rank_with_limits(graph, factors, start, end, EnumerationLimits::unlimited()).paths
}

/// [`rank`] between the fixed `starter` and `end` markers.
pub fn rank_default<F: FactorSource + ?Sized>(graph: &FlowGraph, factors: &F) -> Vec<RankedPath> {
    rank(graph, factors, STARTER, END)
}

/// [`rank`] with enumeration limits; reports truncation.
pub fn rank_with_limits<F: FactorSource + ?Sized>(
    graph: &FlowGraph,
    factors: &F,
    start: &str,
    end: &str,
    limits: EnumerationLimits,
) -> Ranking {
    let enumeration = enumerate_paths_with(graph, start, end, limits);
    let total = enumeration.paths.len();

    let mut ranked: Vec<RankedPath> = enumeration
        .paths
        .into_iter()
        .filter(|path| path.len() > 2)
        .map(|path| RankedPath {
            total_emissions: emissions_of(&path, graph, factors),
            intermediate_count: path.intermediate_count(),
            path,
        })
        .collect();
    ranked.sort_by(RankedPath::cmp_rank);

    info!(
        paths = total,
        ranked = ranked.len(),
        best = ?ranked.first().map(|r| r.total_emissions),
        truncated = enumeration.truncated,
        "routes ranked"
    );

    Ranking { paths: ranked, truncated: enumeration.truncated }
}

/// The first `n` ranked routes, or all of them if there are fewer.
pub fn top_n(ranked: &[RankedPath], n: usize) -> &[RankedPath] {
    &ranked[..n.min(ranked.len())]
}
