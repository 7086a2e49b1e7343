//! Property tests for path enumeration and ranking.
//!
//! Random small flow graphs are checked against a breadth-first brute-force
//! enumerator, and the ranking output is checked for ordering, filtering and
//! top-N prefix properties.

use std::collections::BTreeSet;

use carbon_route::{
    Edge, EmissionFactorTable, FlowGraph, Node, enumerate_paths, rank_default, top_n,
};
use proptest::prelude::*;

const ENERGY: [&str; 4] = ["kWh (Electricidad)", "L (Diesel)", "L (LPG)", "Peat (t)"];

/// Index 0 is `starter`, 1 is `end`, the rest are stages `N0`, `N1`, ...
fn name(i: usize) -> String {
    match i {
        0 => "starter".to_string(),
        1 => "end".to_string(),
        n => format!("N{}", n - 2),
    }
}

/// Random graph: stage count, adjacency matrix (row-major), stage data.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<bool>, Vec<(usize, f64)>)> {
    (0usize..=5).prop_flat_map(|stages| {
        let n = stages + 2;
        (
            Just(stages),
            proptest::collection::vec(any::<bool>(), n * n),
            proptest::collection::vec((0usize..ENERGY.len(), 0.0f64..100.0), stages),
        )
    })
}

fn build(stages: usize, adj: &[bool], data: &[(usize, f64)]) -> FlowGraph {
    let n = stages + 2;
    let mut nodes = vec![Node::starter(), Node::end()];
    for (i, &(energy, qty)) in data.iter().enumerate() {
        nodes.push(Node::normal(name(i + 2), ENERGY[energy], qty));
    }
    let mut edges = Vec::new();
    for src in 0..n {
        for dst in 0..n {
            if src != dst && adj[src * n + dst] {
                edges.push(Edge::new(name(src), name(dst)));
            }
        }
    }
    FlowGraph::build(nodes, edges).unwrap()
}

/// Breadth-first extension of partial walks; independent of the DFS under test.
fn brute_force(stages: usize, adj: &[bool]) -> BTreeSet<Vec<String>> {
    let n = stages + 2;
    let mut found = BTreeSet::new();
    let mut frontier: Vec<Vec<usize>> = vec![vec![0]];
    while let Some(walk) = frontier.pop() {
        let last = *walk.last().unwrap();
        if last == 1 {
            found.insert(walk.iter().map(|&i| name(i)).collect());
            continue;
        }
        for next in 0..n {
            if next != last && adj[last * n + next] && !walk.contains(&next) {
                let mut longer = walk.clone();
                longer.push(next);
                frontier.push(longer);
            }
        }
    }
    found
}

proptest! {
    #[test]
    fn prop_paths_match_brute_force((stages, adj, data) in arb_graph()) {
        let graph = build(stages, &adj, &data);
        let paths = enumerate_paths(&graph, "starter", "end");

        let as_names: Vec<Vec<String>> = paths.iter().map(|p| p.nodes().to_vec()).collect();
        let unique: BTreeSet<Vec<String>> = as_names.iter().cloned().collect();

        prop_assert_eq!(unique.len(), as_names.len(), "duplicate paths emitted");
        prop_assert_eq!(unique, brute_force(stages, &adj));
    }

    #[test]
    fn prop_paths_are_simple_and_anchored((stages, adj, data) in arb_graph()) {
        let graph = build(stages, &adj, &data);
        for path in enumerate_paths(&graph, "starter", "end") {
            prop_assert!(path.is_simple(), "repeated node in {}", path);
            prop_assert_eq!(path.start(), Some("starter"));
            prop_assert_eq!(path.end(), Some("end"));
        }
    }

    #[test]
    fn prop_ranking_sorted_and_filtered((stages, adj, data) in arb_graph()) {
        let graph = build(stages, &adj, &data);
        let ranked = rank_default(&graph, &EmissionFactorTable::default());

        for r in &ranked {
            prop_assert!(r.path.len() > 2);
            prop_assert_eq!(r.intermediate_count, r.path.len() - 2);
            prop_assert!(r.total_emissions >= 0.0);
        }
        for pair in ranked.windows(2) {
            let a = (pair[0].total_emissions, pair[0].intermediate_count);
            let b = (pair[1].total_emissions, pair[1].intermediate_count);
            prop_assert!(a <= b, "{:?} ranked before {:?}", a, b);
        }

        let top = top_n(&ranked, 5);
        prop_assert!(top.len() <= 5);
        prop_assert_eq!(top, &ranked[..top.len()]);
    }
}

#[test]
fn test_complete_graph_path_count() {
    // Every ordered pair of distinct nodes is connected. The number of simple
    // starter -> end paths through k stages is sum_{i=0..k} k!/(k-i)!.
    let stages = 4;
    let n = stages + 2;
    let adj = vec![true; n * n];
    let data = vec![(0, 1.0); stages];
    let graph = build(stages, &adj, &data);

    let paths = enumerate_paths(&graph, "starter", "end");
    // 1 + 4 + 12 + 24 + 24
    assert_eq!(paths.len(), 65);
    assert_eq!(paths.len(), brute_force(stages, &adj).len());
}
