//! Path — an ordered sequence of node names from start to end.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A simple path through the flow graph: no node appears twice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path {
    nodes: Vec<String>,
}

impl Path {
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<String> {
        self.nodes
    }

    /// Number of nodes on the path, endpoints included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes strictly between the two endpoints.
    pub fn intermediate_count(&self) -> usize {
        self.nodes.len().saturating_sub(2)
    }

    pub fn start(&self) -> Option<&str> {
        self.nodes.first().map(String::as_str)
    }

    pub fn end(&self) -> Option<&str> {
        self.nodes.last().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.iter().any(|n| n == name)
    }

    /// True when no node name repeats.
    pub fn is_simple(&self) -> bool {
        let mut seen = hashbrown::HashSet::with_capacity(self.nodes.len());
        self.nodes.iter().all(|n| seen.insert(n.as_str()))
    }

    /// Route text as shown in reports: `starter → A → end`.
    pub fn route(&self) -> String {
        self.nodes.join(" → ")
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route())
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intermediate_count() {
        let p: Path = ["starter", "A", "B", "end"].into_iter().collect();
        assert_eq!(p.len(), 4);
        assert_eq!(p.intermediate_count(), 2);
        let direct: Path = ["starter", "end"].into_iter().collect();
        assert_eq!(direct.intermediate_count(), 0);
        let single: Path = ["starter"].into_iter().collect();
        assert_eq!(single.intermediate_count(), 0);
    }

    #[test]
    fn test_route_text() {
        let p: Path = ["starter", "A", "end"].into_iter().collect();
        assert_eq!(p.route(), "starter → A → end");
        assert_eq!(p.to_string(), p.route());
        assert_eq!(p.start(), Some("starter"));
        assert_eq!(p.end(), Some("end"));
    }

    #[test]
    fn test_is_simple() {
        let p: Path = ["a", "b", "a"].into_iter().collect();
        assert!(!p.is_simple());
        let q: Path = ["a", "b", "c"].into_iter().collect();
        assert!(q.is_simple());
    }
}
