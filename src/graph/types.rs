//! Core type definitions for the graph store

use crate::arena::Id;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Id);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                $name(Id::new(raw))
            }

            pub const fn as_u64(&self) -> u64 {
                self.0.as_u64()
            }

            pub const fn id(&self) -> Id {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<Id> for $name {
            fn from(id: Id) -> Self {
                $name(id)
            }
        }

        impl From<$name> for Id {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<u64> for $name {
            fn from(raw: u64) -> Self {
                $name::new(raw)
            }
        }
    };
}

entity_id!(
    /// Handle of a node in a [`GraphStore`](super::GraphStore)
    NodeId
);

entity_id!(
    /// Handle of an edge in a [`GraphStore`](super::GraphStore)
    EdgeId
);

entity_id!(
    /// Handle of a property record in a [`GraphStore`](super::GraphStore)
    PropertyId
);

/// Which adjacency list of a node to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Edges whose `from` is the node
    Outgoing,
    /// Edges whose `to` is the node
    Incoming,
}

/// The three entity collections owned by a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Node,
    Edge,
    Property,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Node => "node",
            EntityKind::Edge => "edge",
            EntityKind::Property => "property",
        };
        f.write_str(name)
    }
}
