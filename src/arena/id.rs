//! Generation-tagged identifiers handed out by [`Arena`](super::Arena)

use serde::{Deserialize, Serialize};
use std::fmt;

const INDEX_BITS: u32 = 32;
const INDEX_MASK: u64 = 0xFFFF_FFFF;

/// Opaque 64-bit handle: `(generation << 32) | (slot_index + 1)`
///
/// The raw value `0` is reserved as [`Id::NULL`] and is never issued by an
/// arena. A handle stays valid only while its generation matches the one
/// stored in its slot, so a handle to a freed (and possibly reused) slot is
/// rejected in O(1) by every checked accessor.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Id(u64);

impl Id {
    /// The "no entity" handle
    pub const NULL: Id = Id(0);

    pub const fn new(raw: u64) -> Self {
        Id(raw)
    }

    pub(crate) const fn from_parts(index: u32, generation: u32) -> Self {
        Id(((generation as u64) << INDEX_BITS) | (index as u64 + 1))
    }

    pub const fn as_u64(self) -> u64 {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Slot index encoded in the handle, `None` when the index half is zero
    pub const fn index(self) -> Option<u32> {
        let raw = (self.0 & INDEX_MASK) as u32;
        if raw == 0 { None } else { Some(raw - 1) }
    }

    pub const fn generation(self) -> u32 {
        (self.0 >> INDEX_BITS) as u32
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index() {
            Some(index) => write!(f, "{}v{}", index, self.generation()),
            None => write!(f, "null"),
        }
    }
}

impl From<u64> for Id {
    fn from(raw: u64) -> Self {
        Id(raw)
    }
}

impl From<Id> for u64 {
    fn from(id: Id) -> Self {
        id.0
    }
}
