//! Graph store
//!
//! This module implements the structural half of the engine:
//! - Nodes anchoring intrusive outgoing/incoming edge lists
//! - Directed, typed, weighted edges (multiple edges and self-loops allowed)
//! - Free-standing property records with an advisory owner
//! - Cascading delete: removing a node removes every incident edge first

pub mod edge;
pub mod iter;
pub mod node;
mod order;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use iter::{AdjacencyIter, EntityIter};
pub use node::Node;
pub use property::Property;
pub use store::{
    EdgeIter, GraphConfig, GraphError, GraphResult, GraphStatistics, GraphStore, NodeIter,
    PropertyIter,
};
pub use types::{Direction, EdgeId, EntityKind, NodeId, PropertyId};
