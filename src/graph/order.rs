//! Creation-order bookkeeping for entity iteration

use crate::arena::Id;

/// Fixed-capacity list of ids in the order they were created
///
/// Removal shifts the tail down, so survivors keep their relative order.
#[derive(Debug, Clone)]
pub(crate) struct CreationOrder {
    ids: Vec<Id>,
    capacity: usize,
}

impl CreationOrder {
    pub(crate) fn new(capacity: usize) -> Self {
        CreationOrder {
            ids: Vec::new(),
            capacity,
        }
    }

    /// Append `id`; refuses once `capacity` entries are recorded
    pub(crate) fn push(&mut self, id: Id) -> bool {
        if self.ids.len() >= self.capacity {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub(crate) fn remove(&mut self, id: Id) -> bool {
        match self.ids.iter().position(|&recorded| recorded == id) {
            Some(pos) => {
                self.ids.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn get(&self, pos: usize) -> Option<Id> {
        self.ids.get(pos).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.ids.len()
    }
}
