//! Node record
//!
//! A node carries no payload of its own: it is the anchor of two intrusive
//! edge lists. Attach data through property records or a vector index keyed
//! by the node id.

use super::types::{Direction, EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A node and the terminators of its adjacency lists
///
/// Values handed out by the store are copies; editing one never touches the
/// graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// First edge created with this node as `from`
    pub out_head: Option<EdgeId>,

    /// Last edge created with this node as `from`
    pub out_tail: Option<EdgeId>,

    /// First edge created with this node as `to`
    pub in_head: Option<EdgeId>,

    /// Last edge created with this node as `to`
    pub in_tail: Option<EdgeId>,
}

impl Node {
    pub(crate) fn new(id: NodeId) -> Self {
        Node {
            id,
            ..Node::default()
        }
    }

    pub fn head(&self, direction: Direction) -> Option<EdgeId> {
        match direction {
            Direction::Outgoing => self.out_head,
            Direction::Incoming => self.in_head,
        }
    }

    pub fn tail(&self, direction: Direction) -> Option<EdgeId> {
        match direction {
            Direction::Outgoing => self.out_tail,
            Direction::Incoming => self.in_tail,
        }
    }

    /// True when no edge starts or ends here
    pub fn is_isolated(&self) -> bool {
        self.out_head.is_none() && self.in_head.is_none()
    }

    pub(crate) fn set_head(&mut self, direction: Direction, edge: Option<EdgeId>) {
        match direction {
            Direction::Outgoing => self.out_head = edge,
            Direction::Incoming => self.in_head = edge,
        }
    }

    pub(crate) fn set_tail(&mut self, direction: Direction, edge: Option<EdgeId>) {
        match direction {
            Direction::Outgoing => self.out_tail = edge,
            Direction::Incoming => self.in_tail = edge,
        }
    }
}
