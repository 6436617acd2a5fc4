//! Property record
//!
//! Properties form a flat key/value collection next to the topology. The
//! `owner` field is advisory: it is neither validated on creation nor cleared
//! when the referenced entity goes away.

use super::types::PropertyId;
use crate::arena::Id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,

    /// Any handle the caller wants to associate, usually a node or edge id
    pub owner: Id,

    pub key: u64,

    pub value: f64,
}

impl Property {
    /// Whether `owner` names the given entity
    pub fn is_owned_by(&self, owner: impl Into<Id>) -> bool {
        self.owner == owner.into()
    }
}
