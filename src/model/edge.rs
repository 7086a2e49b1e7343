//! Edge — a directed `source → target` link between two node names.

use serde::{Deserialize, Serialize};

/// A directed, unweighted connection between two stages.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self { source: source.into(), target: target.into() }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

impl<S: Into<String>, T: Into<String>> From<(S, T)> for Edge {
    fn from((source, target): (S, T)) -> Self {
        Edge::new(source, target)
    }
}
