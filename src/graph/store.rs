//! In-memory graph storage implementation
//!
//! Three generational arenas hold nodes, edges and properties. Every node
//! anchors two intrusive doubly-linked edge lists (outgoing and incoming)
//! whose links are edge ids stored inside the edge records, and each entity
//! kind keeps a creation-order list for deterministic iteration.
//!
//! Every mutating call validates its inputs first and either succeeds fully
//! or leaves the store exactly as it was.

use super::edge::Edge;
use super::iter::{AdjacencyIter, EntityIter};
use super::node::Node;
use super::order::CreationOrder;
use super::property::Property;
use super::types::{Direction, EdgeId, EntityKind, NodeId, PropertyId};
use crate::arena::{Arena, ArenaError, Id};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Property {0} not found")]
    PropertyNotFound(PropertyId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("{0} capacity exhausted")]
    CapacityExhausted(EntityKind),

    #[error("Invalid {kind} capacity: {source}")]
    InvalidCapacity {
        kind: EntityKind,
        #[source]
        source: ArenaError,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Fixed capacities of a [`GraphStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Maximum number of live nodes
    pub node_capacity: usize,
    /// Maximum number of live edges
    pub edge_capacity: usize,
    /// Maximum number of live property records
    pub property_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            node_capacity: 1024,
            edge_capacity: 4096,
            property_capacity: 1024,
        }
    }
}

/// Point-in-time counters of a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub property_count: usize,
    pub node_capacity: usize,
    pub edge_capacity: usize,
    pub property_capacity: usize,
}

pub type NodeIter<'a> = EntityIter<'a, Node, NodeId>;
pub type EdgeIter<'a> = EntityIter<'a, Edge, EdgeId>;
pub type PropertyIter<'a> = EntityIter<'a, Property, PropertyId>;

/// In-memory graph storage
///
/// - nodes / edges / properties: generational arenas (O(1) lookup, stale ids rejected)
/// - node_order / edge_order / property_order: creation order for iteration
/// - adjacency: intrusive lists threaded through the edge records
#[derive(Debug, Clone)]
pub struct GraphStore {
    nodes: Arena<Node>,
    edges: Arena<Edge>,
    properties: Arena<Property>,

    node_order: CreationOrder,
    edge_order: CreationOrder,
    property_order: CreationOrder,
}

impl GraphStore {
    /// Create an empty store with fixed capacities; none may be zero
    pub fn new(
        node_capacity: usize,
        edge_capacity: usize,
        property_capacity: usize,
    ) -> GraphResult<Self> {
        let store = GraphStore {
            nodes: arena(EntityKind::Node, node_capacity)?,
            edges: arena(EntityKind::Edge, edge_capacity)?,
            properties: arena(EntityKind::Property, property_capacity)?,
            node_order: CreationOrder::new(node_capacity),
            edge_order: CreationOrder::new(edge_capacity),
            property_order: CreationOrder::new(property_capacity),
        };
        debug!(
            "Created graph store (nodes: {}, edges: {}, properties: {})",
            node_capacity, edge_capacity, property_capacity
        );
        Ok(store)
    }

    pub fn with_config(config: &GraphConfig) -> GraphResult<Self> {
        Self::new(
            config.node_capacity,
            config.edge_capacity,
            config.property_capacity,
        )
    }

    // ============================================================
    // Nodes
    // ============================================================

    /// Create an isolated node
    pub fn create_node(&mut self) -> GraphResult<NodeId> {
        let Some((raw, node)) = self.nodes.allocate() else {
            debug!("Node arena exhausted at {} nodes", self.nodes.len());
            return Err(GraphError::CapacityExhausted(EntityKind::Node));
        };
        let id = NodeId::from(raw);
        *node = Node::new(id);

        if !self.node_order.push(raw) {
            self.nodes.free(raw);
            return Err(GraphError::CapacityExhausted(EntityKind::Node));
        }
        trace!("Created node {}", id);
        Ok(id)
    }

    /// Delete a node together with every edge that starts or ends at it
    pub fn delete_node(&mut self, id: NodeId) -> GraphResult<()> {
        if !self.nodes.contains(id.into()) {
            return Err(GraphError::NodeNotFound(id));
        }

        let mut removed = 0usize;
        for direction in [Direction::Outgoing, Direction::Incoming] {
            // Re-read the head each round: removal moves it
            while let Some(edge_id) = self.nodes.get(id.into()).and_then(|n| n.head(direction)) {
                let unlinked = self.remove_edge(edge_id);
                debug_assert!(unlinked, "adjacency list of {} references dead edge {}", id, edge_id);
                if !unlinked {
                    break;
                }
                removed += 1;
            }
        }

        self.nodes.free(id.into());
        self.node_order.remove(id.into());
        debug!("Deleted node {} with {} incident edges", id, removed);
        Ok(())
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains(id.into())
    }

    /// Copy of the node record
    pub fn get_node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(id.into()).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Live nodes in creation order
    pub fn nodes(&self) -> NodeIter<'_> {
        EntityIter::new(&self.nodes, &self.node_order)
    }

    // ============================================================
    // Edges
    // ============================================================

    /// Create an edge between two existing nodes
    ///
    /// The edge is appended to the tail of `from`'s outgoing list and of
    /// `to`'s incoming list. Self-loops are allowed.
    pub fn create_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        edge_type: u64,
        weight: f64,
        timestamp: u64,
    ) -> GraphResult<EdgeId> {
        let Some(out_prev) = self
            .nodes
            .get(from.into())
            .map(|n| n.tail(Direction::Outgoing))
        else {
            return Err(GraphError::InvalidEdgeSource(from));
        };
        let Some(in_prev) = self
            .nodes
            .get(to.into())
            .map(|n| n.tail(Direction::Incoming))
        else {
            return Err(GraphError::InvalidEdgeTarget(to));
        };

        let Some((raw, edge)) = self.edges.allocate() else {
            debug!("Edge arena exhausted at {} edges", self.edges.len());
            return Err(GraphError::CapacityExhausted(EntityKind::Edge));
        };
        let id = EdgeId::from(raw);
        *edge = Edge {
            id,
            from,
            to,
            edge_type,
            weight,
            timestamp,
            out_prev,
            out_next: None,
            in_prev,
            in_next: None,
        };

        self.link_tail(id, from, Direction::Outgoing, out_prev);
        self.link_tail(id, to, Direction::Incoming, in_prev);

        if !self.edge_order.push(raw) {
            self.remove_edge_slot(id);
            return Err(GraphError::CapacityExhausted(EntityKind::Edge));
        }
        trace!("Created edge {} ({} -> {})", id, from, to);
        Ok(id)
    }

    /// Delete an edge, unlinking it from both adjacency lists
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        if self.remove_edge(id) {
            trace!("Deleted edge {}", id);
            Ok(())
        } else {
            Err(GraphError::EdgeNotFound(id))
        }
    }

    pub fn has_edge(&self, id: EdgeId) -> bool {
        self.edges.contains(id.into())
    }

    /// Copy of the edge record
    pub fn get_edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(id.into()).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_capacity(&self) -> usize {
        self.edges.capacity()
    }

    /// Live edges in creation order
    pub fn edges(&self) -> EdgeIter<'_> {
        EntityIter::new(&self.edges, &self.edge_order)
    }

    /// Edges of one adjacency list of `node`, oldest first
    ///
    /// Empty for a node that does not exist.
    pub fn edges_of(&self, node: NodeId, direction: Direction) -> AdjacencyIter<'_> {
        let head = self.nodes.get(node.into()).and_then(|n| n.head(direction));
        AdjacencyIter::new(&self.edges, head, direction)
    }

    pub fn out_edges(&self, node: NodeId) -> AdjacencyIter<'_> {
        self.edges_of(node, Direction::Outgoing)
    }

    pub fn in_edges(&self, node: NodeId) -> AdjacencyIter<'_> {
        self.edges_of(node, Direction::Incoming)
    }

    /// Far endpoints of one adjacency list, in list order
    ///
    /// A node reached through several edges is yielded once per edge.
    pub fn neighbors(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> impl Iterator<Item = NodeId> + '_ {
        self.edges_of(node, direction)
            .filter_map(move |id| self.edges.get(id.into()).map(|e| e.opposite(direction)))
    }

    /// Outgoing edges of `from` that end at `to`
    pub fn edges_between(&self, from: NodeId, to: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        self.out_edges(from)
            .filter(move |&id| self.edges.get(id.into()).is_some_and(|e| e.to == to))
    }

    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_edges(node).count()
    }

    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_edges(node).count()
    }

    // ============================================================
    // Properties
    // ============================================================

    /// Create a free-standing property record
    ///
    /// `owner` is stored as given and never checked against the graph.
    pub fn create_property(
        &mut self,
        owner: impl Into<Id>,
        key: u64,
        value: f64,
    ) -> GraphResult<PropertyId> {
        let Some((raw, property)) = self.properties.allocate() else {
            debug!("Property arena exhausted at {} records", self.properties.len());
            return Err(GraphError::CapacityExhausted(EntityKind::Property));
        };
        let id = PropertyId::from(raw);
        *property = Property {
            id,
            owner: owner.into(),
            key,
            value,
        };

        if !self.property_order.push(raw) {
            self.properties.free(raw);
            return Err(GraphError::CapacityExhausted(EntityKind::Property));
        }
        trace!("Created property {}", id);
        Ok(id)
    }

    pub fn delete_property(&mut self, id: PropertyId) -> GraphResult<()> {
        if !self.properties.free(id.into()) {
            return Err(GraphError::PropertyNotFound(id));
        }
        self.property_order.remove(id.into());
        trace!("Deleted property {}", id);
        Ok(())
    }

    pub fn has_property(&self, id: PropertyId) -> bool {
        self.properties.contains(id.into())
    }

    /// Copy of the property record
    pub fn get_property(&self, id: PropertyId) -> Option<Property> {
        self.properties.get(id.into()).copied()
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    pub fn property_capacity(&self) -> usize {
        self.properties.capacity()
    }

    /// Live properties in creation order
    pub fn properties(&self) -> PropertyIter<'_> {
        EntityIter::new(&self.properties, &self.property_order)
    }

    /// Live properties whose advisory owner is `owner`, in creation order
    pub fn properties_of(&self, owner: impl Into<Id>) -> impl Iterator<Item = PropertyId> + '_ {
        let owner = owner.into();
        self.properties().filter(move |&id| {
            self.properties
                .get(id.into())
                .is_some_and(|p| p.is_owned_by(owner))
        })
    }

    // ============================================================
    // Statistics
    // ============================================================

    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            property_count: self.property_count(),
            node_capacity: self.node_capacity(),
            edge_capacity: self.edge_capacity(),
            property_capacity: self.property_capacity(),
        }
    }

    // ============================================================
    // Intrusive list maintenance
    // ============================================================

    /// Append `edge` after `prev` (the current tail) in `owner`'s list
    fn link_tail(&mut self, edge: EdgeId, owner: NodeId, direction: Direction, prev: Option<EdgeId>) {
        match prev.and_then(|p| self.edges.get_mut(p.into())) {
            Some(prev_edge) => prev_edge.set_next(direction, Some(edge)),
            None => {
                if let Some(node) = self.nodes.get_mut(owner.into()) {
                    node.set_head(direction, Some(edge));
                }
            }
        }
        if let Some(node) = self.nodes.get_mut(owner.into()) {
            node.set_tail(direction, Some(edge));
        }
    }

    /// Patch neighbours (or the owner's terminators) around `edge`
    fn unlink(&mut self, edge: &Edge, direction: Direction) {
        let owner = edge.owner(direction);
        let prev = edge.prev(direction);
        let next = edge.next(direction);

        match prev.and_then(|p| self.edges.get_mut(p.into())) {
            Some(prev_edge) => prev_edge.set_next(direction, next),
            None => {
                if let Some(node) = self.nodes.get_mut(owner.into()) {
                    node.set_head(direction, next);
                }
            }
        }
        match next.and_then(|n| self.edges.get_mut(n.into())) {
            Some(next_edge) => next_edge.set_prev(direction, prev),
            None => {
                if let Some(node) = self.nodes.get_mut(owner.into()) {
                    node.set_tail(direction, prev);
                }
            }
        }
    }

    /// Unlink and free an edge slot without touching the order list
    fn remove_edge_slot(&mut self, id: EdgeId) -> bool {
        let Some(edge) = self.edges.get(id.into()).copied() else {
            return false;
        };
        self.unlink(&edge, Direction::Outgoing);
        self.unlink(&edge, Direction::Incoming);
        self.edges.free(id.into())
    }

    fn remove_edge(&mut self, id: EdgeId) -> bool {
        if !self.remove_edge_slot(id) {
            return false;
        }
        self.edge_order.remove(id.into());
        true
    }
}

fn arena<T: Default>(kind: EntityKind, capacity: usize) -> GraphResult<Arena<T>> {
    Arena::new(capacity).map_err(|source| GraphError::InvalidCapacity { kind, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> GraphStore {
        GraphStore::new(8, 8, 8).unwrap()
    }

    fn out(store: &GraphStore, node: NodeId) -> Vec<EdgeId> {
        store.out_edges(node).collect()
    }

    fn inc(store: &GraphStore, node: NodeId) -> Vec<EdgeId> {
        store.in_edges(node).collect()
    }

    #[test]
    fn test_create_store_rejects_zero_capacity() {
        let err = GraphStore::new(0, 8, 8).unwrap_err();
        assert_eq!(
            err,
            GraphError::InvalidCapacity {
                kind: EntityKind::Node,
                source: ArenaError::ZeroCapacity,
            }
        );
        assert!(GraphStore::new(8, 0, 8).is_err());
        assert!(GraphStore::new(8, 8, 0).is_err());
    }

    #[test]
    fn test_with_config() {
        let config = GraphConfig {
            node_capacity: 2,
            edge_capacity: 3,
            property_capacity: 4,
        };
        let store = GraphStore::with_config(&config).unwrap();
        assert_eq!(store.node_capacity(), 2);
        assert_eq!(store.edge_capacity(), 3);
        assert_eq!(store.property_capacity(), 4);
    }

    #[test]
    fn test_create_and_get_node() {
        let mut store = store();
        let id = store.create_node().unwrap();

        assert!(store.has_node(id));
        let node = store.get_node(id).unwrap();
        assert_eq!(node.id, id);
        assert!(node.is_isolated());
        assert_eq!(node.out_tail, None);
        assert_eq!(node.in_tail, None);
        assert_eq!(store.node_count(), 1);
    }

    #[test]
    fn test_node_capacity_exhausted() {
        let mut store = GraphStore::new(2, 1, 1).unwrap();
        store.create_node().unwrap();
        store.create_node().unwrap();
        assert_eq!(
            store.create_node(),
            Err(GraphError::CapacityExhausted(EntityKind::Node))
        );
        assert_eq!(store.node_count(), 2);
        assert_eq!(store.nodes().count(), 2);
    }

    #[test]
    fn test_create_edge_links_both_lists() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e = store.create_edge(a, b, 7, 0.25, 99).unwrap();

        let edge = store.get_edge(e).unwrap();
        assert_eq!(edge.from, a);
        assert_eq!(edge.to, b);
        assert_eq!(edge.edge_type, 7);
        assert_eq!(edge.weight, 0.25);
        assert_eq!(edge.timestamp, 99);

        let a_node = store.get_node(a).unwrap();
        assert_eq!(a_node.out_head, Some(e));
        assert_eq!(a_node.out_tail, Some(e));
        let b_node = store.get_node(b).unwrap();
        assert_eq!(b_node.in_head, Some(e));
        assert_eq!(b_node.in_tail, Some(e));
    }

    #[test]
    fn test_create_edge_requires_endpoints() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let missing = NodeId::new(999);

        assert_eq!(
            store.create_edge(a, missing, 1, 0.0, 0),
            Err(GraphError::InvalidEdgeTarget(missing))
        );
        assert_eq!(
            store.create_edge(missing, a, 1, 0.0, 0),
            Err(GraphError::InvalidEdgeSource(missing))
        );
        assert_eq!(store.edge_count(), 0);
        assert!(store.get_node(a).unwrap().is_isolated());
    }

    #[test]
    fn test_edge_capacity_exhausted_leaves_lists_untouched() {
        let mut store = GraphStore::new(4, 1, 1).unwrap();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e1 = store.create_edge(a, b, 1, 0.0, 0).unwrap();

        assert_eq!(
            store.create_edge(a, b, 1, 0.0, 0),
            Err(GraphError::CapacityExhausted(EntityKind::Edge))
        );
        assert_eq!(out(&store, a), vec![e1]);
        assert_eq!(inc(&store, b), vec![e1]);
    }

    /// Same ids as `order`, with no room left
    fn full(order: &CreationOrder) -> CreationOrder {
        let mut full = CreationOrder::new(order.len());
        for pos in 0..order.len() {
            assert!(full.push(order.get(pos).unwrap()));
        }
        full
    }

    #[test]
    fn test_node_order_full_rolls_back_create() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e = store.create_edge(a, b, 1, 0.5, 0).unwrap();
        store.node_order = full(&store.node_order);

        let before = store.statistics();
        assert_eq!(
            store.create_node(),
            Err(GraphError::CapacityExhausted(EntityKind::Node))
        );
        assert_eq!(store.statistics(), before);
        assert_eq!(store.nodes().collect::<Vec<_>>(), vec![a, b]);
        assert!(store.has_edge(e));
        assert_eq!(out(&store, a), vec![e]);
    }

    #[test]
    fn test_edge_order_full_rolls_back_links() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let c = store.create_node().unwrap();
        let e1 = store.create_edge(a, b, 1, 0.5, 10).unwrap();
        let e2 = store.create_edge(c, a, 2, 1.5, 20).unwrap();
        store.edge_order = full(&store.edge_order);

        let nodes: Vec<Option<Node>> = [a, b, c].iter().map(|&n| store.get_node(n)).collect();
        let edges = (store.get_edge(e1), store.get_edge(e2));
        let before = store.statistics();

        // Plain edge and self-loop both touch lists that already hold edges
        for (from, to) in [(a, b), (a, a), (c, a)] {
            assert_eq!(
                store.create_edge(from, to, 3, 0.0, 0),
                Err(GraphError::CapacityExhausted(EntityKind::Edge))
            );
        }

        assert_eq!(store.statistics(), before);
        let after: Vec<Option<Node>> = [a, b, c].iter().map(|&n| store.get_node(n)).collect();
        assert_eq!(after, nodes);
        assert_eq!((store.get_edge(e1), store.get_edge(e2)), edges);
        assert_eq!(store.edges().collect::<Vec<_>>(), vec![e1, e2]);
        assert_eq!(out(&store, a), vec![e1]);
        assert_eq!(inc(&store, a), vec![e2]);
        assert_eq!(out(&store, c), vec![e2]);
    }

    #[test]
    fn test_property_order_full_rolls_back_create() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let p = store.create_property(a, 1, 2.5).unwrap();
        store.property_order = full(&store.property_order);

        let record = store.get_property(p);
        let before = store.statistics();
        assert_eq!(
            store.create_property(a, 2, 0.0),
            Err(GraphError::CapacityExhausted(EntityKind::Property))
        );
        assert_eq!(store.statistics(), before);
        assert_eq!(store.get_property(p), record);
        assert_eq!(store.properties().collect::<Vec<_>>(), vec![p]);
        assert_eq!(store.properties_of(a).collect::<Vec<_>>(), vec![p]);
    }

    #[test]
    fn test_large_capacity_does_not_allocate_up_front() {
        let mut store = GraphStore::new(u32::MAX as usize, 1, 1).unwrap();
        assert_eq!(store.node_capacity(), u32::MAX as usize);
        let a = store.create_node().unwrap();
        assert_eq!(store.nodes().collect::<Vec<_>>(), vec![a]);
    }

    #[test]
    fn test_adjacency_order() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let c = store.create_node().unwrap();

        let e1 = store.create_edge(a, b, 1, 0.5, 10).unwrap();
        let e2 = store.create_edge(a, c, 2, 1.0, 20).unwrap();
        let e3 = store.create_edge(b, c, 1, 1.0, 30).unwrap();

        assert_eq!(out(&store, a), vec![e1, e2]);
        assert_eq!(out(&store, b), vec![e3]);
        assert_eq!(inc(&store, c), vec![e2, e3]);
        assert!(out(&store, c).is_empty());
        assert_eq!(store.out_degree(a), 2);
        assert_eq!(store.in_degree(c), 2);
    }

    #[test]
    fn test_delete_middle_edge() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e1 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let e2 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let e3 = store.create_edge(a, b, 1, 0.0, 0).unwrap();

        store.delete_edge(e2).unwrap();
        assert_eq!(out(&store, a), vec![e1, e3]);
        assert_eq!(inc(&store, b), vec![e1, e3]);
        assert_eq!(store.get_edge(e1).unwrap().out_next, Some(e3));
        assert_eq!(store.get_edge(e3).unwrap().in_prev, Some(e1));
    }

    #[test]
    fn test_delete_head_and_tail_edges() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e1 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let e2 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let e3 = store.create_edge(a, b, 1, 0.0, 0).unwrap();

        store.delete_edge(e1).unwrap();
        let node = store.get_node(a).unwrap();
        assert_eq!(node.out_head, Some(e2));
        assert_eq!(store.get_edge(e2).unwrap().out_prev, None);

        store.delete_edge(e3).unwrap();
        let node = store.get_node(a).unwrap();
        assert_eq!(node.out_tail, Some(e2));
        assert_eq!(store.get_edge(e2).unwrap().out_next, None);

        store.delete_edge(e2).unwrap();
        assert!(store.get_node(a).unwrap().is_isolated());
        assert!(store.get_node(b).unwrap().is_isolated());
    }

    #[test]
    fn test_delete_edge_twice() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let e = store.create_edge(a, a, 1, 0.0, 0).unwrap();
        assert!(store.delete_edge(e).is_ok());
        assert_eq!(store.delete_edge(e), Err(GraphError::EdgeNotFound(e)));
    }

    #[test]
    fn test_self_loop() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let e = store.create_edge(a, a, 1, 0.0, 0).unwrap();

        assert_eq!(out(&store, a), vec![e]);
        assert_eq!(inc(&store, a), vec![e]);
        assert!(store.get_edge(e).unwrap().is_self_loop());

        store.delete_node(a).unwrap();
        assert_eq!(store.edge_count(), 0);
        assert!(!store.has_edge(e));
    }

    #[test]
    fn test_delete_node_cascades() {
        // capacities node=8, edge=8; a->b, a->c; destroy a
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let c = store.create_node().unwrap();
        let e1 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let e2 = store.create_edge(a, c, 1, 0.0, 0).unwrap();

        store.delete_node(a).unwrap();
        assert_eq!(store.edge_count(), 0);
        assert_eq!(store.node_count(), 2);
        assert!(!store.has_node(a));
        assert!(!store.has_edge(e1));
        assert!(!store.has_edge(e2));
        assert!(inc(&store, b).is_empty());
        assert!(inc(&store, c).is_empty());
    }

    #[test]
    fn test_delete_node_keeps_unrelated_edges() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let c = store.create_node().unwrap();
        let ab = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        let bc = store.create_edge(b, c, 1, 0.0, 0).unwrap();
        let ca = store.create_edge(c, a, 1, 0.0, 0).unwrap();
        let cb = store.create_edge(c, b, 1, 0.0, 0).unwrap();

        store.delete_node(a).unwrap();
        assert!(!store.has_edge(ab));
        assert!(!store.has_edge(ca));
        assert_eq!(store.edges().collect::<Vec<_>>(), vec![bc, cb]);
        assert_eq!(out(&store, c), vec![cb]);
        assert_eq!(inc(&store, b), vec![cb]);
    }

    #[test]
    fn test_delete_missing_node() {
        let mut store = store();
        let a = store.create_node().unwrap();
        store.delete_node(a).unwrap();
        assert_eq!(store.delete_node(a), Err(GraphError::NodeNotFound(a)));
    }

    #[test]
    fn test_stale_node_handle() {
        let mut store = GraphStore::new(1, 1, 1).unwrap();
        let old = store.create_node().unwrap();
        store.delete_node(old).unwrap();
        let new = store.create_node().unwrap();

        assert_ne!(old, new);
        assert_eq!(old.id().index(), new.id().index());
        assert!(!store.has_node(old));
        assert!(store.get_node(old).is_none());
        assert_eq!(store.delete_node(old), Err(GraphError::NodeNotFound(old)));
        assert!(store.has_node(new));
    }

    #[test]
    fn test_get_returns_copy() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let e = store.create_edge(a, b, 1, 1.0, 0).unwrap();

        let mut edge = store.get_edge(e).unwrap();
        edge.weight = 42.0;
        edge.out_next = Some(EdgeId::new(12345));
        assert_eq!(store.get_edge(e).unwrap().weight, 1.0);
        assert_eq!(store.get_edge(e).unwrap().out_next, None);
    }

    #[test]
    fn test_iteration_creation_order() {
        let mut store = store();
        let ids: Vec<NodeId> = (0..5).map(|_| store.create_node().unwrap()).collect();
        store.delete_node(ids[1]).unwrap();
        store.delete_node(ids[3]).unwrap();
        // Reuses a freed slot but lands at the end of the order
        let late = store.create_node().unwrap();

        let seen: Vec<NodeId> = store.nodes().collect();
        assert_eq!(seen, vec![ids[0], ids[2], ids[4], late]);

        // Fresh iterator restarts from the beginning
        assert_eq!(store.nodes().next(), Some(ids[0]));
    }

    #[test]
    fn test_neighbors_and_edges_between() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let b = store.create_node().unwrap();
        let c = store.create_node().unwrap();
        let ab1 = store.create_edge(a, b, 1, 0.0, 0).unwrap();
        store.create_edge(a, c, 1, 0.0, 0).unwrap();
        let ab2 = store.create_edge(a, b, 2, 0.0, 0).unwrap();

        let out_neighbors: Vec<NodeId> = store.neighbors(a, Direction::Outgoing).collect();
        assert_eq!(out_neighbors, vec![b, c, b]);
        let in_neighbors: Vec<NodeId> = store.neighbors(b, Direction::Incoming).collect();
        assert_eq!(in_neighbors, vec![a, a]);

        assert_eq!(store.edges_between(a, b).collect::<Vec<_>>(), vec![ab1, ab2]);
        assert_eq!(store.edges_between(b, a).count(), 0);
    }

    #[test]
    fn test_edges_of_missing_node_is_empty() {
        let store = store();
        assert_eq!(store.out_edges(NodeId::new(77)).count(), 0);
        assert_eq!(store.in_degree(NodeId::new(77)), 0);
    }

    #[test]
    fn test_properties() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let p1 = store.create_property(a, 1, 0.5).unwrap();
        let p2 = store.create_property(Id::new(12345), 2, 1.5).unwrap();
        let p3 = store.create_property(a, 3, 2.5).unwrap();

        let prop = store.get_property(p1).unwrap();
        assert_eq!(prop.owner, a.id());
        assert_eq!(prop.key, 1);
        assert_eq!(prop.value, 0.5);

        assert_eq!(store.properties_of(a).collect::<Vec<_>>(), vec![p1, p3]);

        store.delete_property(p1).unwrap();
        assert_eq!(store.delete_property(p1), Err(GraphError::PropertyNotFound(p1)));
        assert_eq!(store.properties().collect::<Vec<_>>(), vec![p2, p3]);
        assert_eq!(store.property_count(), 2);
    }

    #[test]
    fn test_properties_survive_owner_deletion() {
        let mut store = store();
        let a = store.create_node().unwrap();
        let p = store.create_property(a, 1, 1.0).unwrap();
        store.delete_node(a).unwrap();

        assert!(store.has_property(p));
        assert_eq!(store.get_property(p).unwrap().owner, a.id());
    }

    #[test]
    fn test_statistics() {
        let mut store = GraphStore::new(4, 5, 6).unwrap();
        let a = store.create_node().unwrap();
        store.create_edge(a, a, 1, 0.0, 0).unwrap();
        store.create_property(a, 1, 0.0).unwrap();

        let stats = store.statistics();
        assert_eq!(
            stats,
            GraphStatistics {
                node_count: 1,
                edge_count: 1,
                property_count: 1,
                node_capacity: 4,
                edge_capacity: 5,
                property_capacity: 6,
            }
        );
    }
}
