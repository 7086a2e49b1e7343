//! # Flow Model
//!
//! Plain data types shared by the graph, ranking, fuzzy and export layers.
//!
//! Design rule: no traversal logic and no I/O here. These are DTOs that
//! cross the boundary between the flow editor and the evaluation core.

pub mod node;
pub mod edge;
pub mod path;
pub mod description;

pub use node::{Node, NodeRole, SpecialRole, Bounds, STARTER, END};
pub use edge::Edge;
pub use path::Path;
pub use description::{GraphDescription, NodeDescription, EdgeDescription, NodeKind};
