//! Nautylus
//!
//! An embeddable, in-memory graph store paired with an exact-search vector
//! index over the same id space.
//!
//! # Architecture
//!
//! - [`arena`]: fixed-capacity generational slot tables. Ids encode
//!   `(generation << 32) | (slot + 1)`, so a handle to a freed slot is rejected
//!   in O(1) even after the slot is reused.
//! - [`graph`]: nodes, edges and properties in three arenas. Adjacency is kept
//!   as intrusive doubly-linked lists threaded through the edge records;
//!   deleting a node deletes its incident edges first.
//! - [`vector`]: dense slot table of fixed-dimension vectors with exact kNN
//!   (squared L2, ties broken by ascending id).
//! - [`hybrid`]: keeps a graph and a vector index in step when vectors are
//!   keyed by node id.
//!
//! Everything is single-threaded and synchronous. A store is owned by one
//! context at a time; wrap it in a lock to share it.
//!
//! ## Example Usage
//!
//! ```rust
//! use nautylus::graph::GraphStore;
//! use nautylus::vector::VectorIndex;
//!
//! let mut store = GraphStore::new(8, 8, 8).unwrap();
//! let alice = store.create_node().unwrap();
//! let bob = store.create_node().unwrap();
//! let knows = store.create_edge(alice, bob, 1, 0.9, 0).unwrap();
//!
//! assert_eq!(store.out_edges(alice).collect::<Vec<_>>(), vec![knows]);
//!
//! let mut vectors = VectorIndex::new(2, 8).unwrap();
//! vectors.set(alice, &[0.0, 0.0]).unwrap();
//! vectors.set(bob, &[1.0, 0.0]).unwrap();
//! let hits = vectors.knn(&[0.1, 0.0], 1).unwrap();
//! assert_eq!(hits[0].id, alice.id());
//!
//! // Deleting a node takes its edges with it
//! store.delete_node(alice).unwrap();
//! assert!(!store.has_edge(knows));
//! ```

#![warn(clippy::all)]

pub mod arena;
pub mod config;
pub mod graph;
pub mod hybrid;
pub mod vector;

// Re-export main types for convenience
pub use arena::{Arena, ArenaError, Id};
pub use config::{ConfigError, NautylusConfig};
pub use graph::{
    Direction, Edge, EdgeId, GraphConfig, GraphError, GraphResult, GraphStatistics, GraphStore,
    Node, NodeId, Property, PropertyId,
};
pub use hybrid::{HybridError, HybridResult, HybridStore, SimilarNode};
pub use vector::{Neighbor, VectorConfig, VectorError, VectorIndex, VectorResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
