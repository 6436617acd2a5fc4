//! Edge record
//!
//! Edges are directed and typed. Each edge is a member of two intrusive
//! doubly-linked lists at once: the outgoing list of `from` and the incoming
//! list of `to`. The link fields live in the record itself.

use super::types::{Direction, EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed edge plus its list links
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub from: NodeId,

    /// Target node (edge goes TO this node)
    pub to: NodeId,

    /// Caller-defined relationship tag
    pub edge_type: u64,

    pub weight: f64,

    /// Caller-defined timestamp, stored verbatim
    pub timestamp: u64,

    /// Previous edge in `from`'s outgoing list
    pub out_prev: Option<EdgeId>,

    /// Next edge in `from`'s outgoing list
    pub out_next: Option<EdgeId>,

    /// Previous edge in `to`'s incoming list
    pub in_prev: Option<EdgeId>,

    /// Next edge in `to`'s incoming list
    pub in_next: Option<EdgeId>,
}

impl Edge {
    /// Node whose list of the given direction holds this edge
    pub fn owner(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Outgoing => self.from,
            Direction::Incoming => self.to,
        }
    }

    /// Endpoint on the far side when walking `direction` from the owner
    pub fn opposite(&self, direction: Direction) -> NodeId {
        match direction {
            Direction::Outgoing => self.to,
            Direction::Incoming => self.from,
        }
    }

    pub fn prev(&self, direction: Direction) -> Option<EdgeId> {
        match direction {
            Direction::Outgoing => self.out_prev,
            Direction::Incoming => self.in_prev,
        }
    }

    pub fn next(&self, direction: Direction) -> Option<EdgeId> {
        match direction {
            Direction::Outgoing => self.out_next,
            Direction::Incoming => self.in_next,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    pub(crate) fn set_prev(&mut self, direction: Direction, edge: Option<EdgeId>) {
        match direction {
            Direction::Outgoing => self.out_prev = edge,
            Direction::Incoming => self.in_prev = edge,
        }
    }

    pub(crate) fn set_next(&mut self, direction: Direction, edge: Option<EdgeId>) {
        match direction {
            Direction::Outgoing => self.out_next = edge,
            Direction::Incoming => self.in_next = edge,
        }
    }
}
