//! Graph + vector facade
//!
//! [`GraphStore`] and [`VectorIndex`] know nothing about each other; they
//! share an id space by convention. `HybridStore` keeps the two in step for
//! the common case where vectors are keyed by node id, and answers
//! "which nodes look like this one, and are they linked to it" queries.

use crate::config::NautylusConfig;
use crate::graph::{GraphError, GraphStore, NodeId};
use crate::vector::{VectorError, VectorIndex};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HybridError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Vector error: {0}")]
    Vector(#[from] VectorError),

    #[error("Node {0} has no vector")]
    MissingVector(NodeId),
}

pub type HybridResult<T> = Result<T, HybridError>;

/// A nearest neighbour of some node, with its graph relationship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarNode {
    pub id: NodeId,
    /// Squared Euclidean distance between the two vectors
    pub distance: f32,
    /// True if an edge links the two nodes in either direction
    pub connected: bool,
}

#[derive(Debug, Clone)]
pub struct HybridStore {
    graph: GraphStore,
    vectors: VectorIndex,
}

impl HybridStore {
    pub fn new(graph: GraphStore, vectors: VectorIndex) -> Self {
        Self { graph, vectors }
    }

    pub fn with_config(config: &NautylusConfig) -> HybridResult<Self> {
        Ok(Self::new(
            GraphStore::with_config(&config.graph)?,
            VectorIndex::with_config(&config.vector)?,
        ))
    }

    pub fn graph(&self) -> &GraphStore {
        &self.graph
    }

    pub fn graph_mut(&mut self) -> &mut GraphStore {
        &mut self.graph
    }

    pub fn vectors(&self) -> &VectorIndex {
        &self.vectors
    }

    pub fn vectors_mut(&mut self) -> &mut VectorIndex {
        &mut self.vectors
    }

    /// Create a node and store `vector` under its id
    ///
    /// A vector the index would reject fails the call before any node is
    /// allocated.
    pub fn create_node_with_vector(&mut self, vector: &[f32]) -> HybridResult<NodeId> {
        self.vectors.ensure_room(vector)?;
        let node = self.graph.create_node()?;
        if let Err(err) = self.vectors.set(node, vector) {
            self.graph.delete_node(node)?;
            return Err(err.into());
        }
        Ok(node)
    }

    /// Store or replace the vector of an existing node
    pub fn set_vector(&mut self, node: NodeId, vector: &[f32]) -> HybridResult<()> {
        if !self.graph.has_node(node) {
            return Err(GraphError::NodeNotFound(node).into());
        }
        self.vectors.set(node, vector)?;
        Ok(())
    }

    pub fn vector(&self, node: NodeId) -> Option<Vec<f32>> {
        self.vectors.get(node)
    }

    /// Delete a node, its incident edges and its vector
    pub fn delete_node(&mut self, node: NodeId) -> HybridResult<()> {
        self.graph.delete_node(node)?;
        if self.vectors.contains(node) {
            self.vectors.remove(node)?;
        }
        Ok(())
    }

    /// Whether any edge runs between `a` and `b`, in either direction
    pub fn connected(&self, a: NodeId, b: NodeId) -> bool {
        self.graph.edges_between(a, b).next().is_some()
            || self.graph.edges_between(b, a).next().is_some()
    }

    /// The `k` nodes whose vectors are closest to `node`'s own vector
    ///
    /// `node` itself is never part of the result.
    pub fn similar_nodes(&self, node: NodeId, k: usize) -> HybridResult<Vec<SimilarNode>> {
        let query = self
            .vectors
            .get(node)
            .ok_or(HybridError::MissingVector(node))?;

        let hits = self.vectors.knn(&query, k.saturating_add(1))?;
        let similar: Vec<SimilarNode> = hits
            .into_iter()
            .filter(|hit| hit.id != node.id())
            .take(k)
            .map(|hit| {
                let id = NodeId::from(hit.id);
                SimilarNode {
                    id,
                    distance: hit.distance,
                    connected: self.connected(node, id),
                }
            })
            .collect();

        debug!("Found {} nodes similar to {}", similar.len(), node);
        Ok(similar)
    }
}
