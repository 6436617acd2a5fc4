//! Exact nearest-neighbour vector index
//!
//! Vectors live in one dense `capacity * dimension` buffer. A slot is vacant
//! when its id is [`Id::NULL`]. New ids take the first vacant slot in physical
//! order; an id-to-slot map keeps upserts and lookups O(1).
//!
//! `knn` scans every occupied slot, so results are exact. Ordering is by
//! squared L2 distance, then by ascending id, which makes results independent
//! of insertion order.

use crate::arena::Id;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, trace};

/// Vector index errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    #[error("Vector dimension must be greater than zero")]
    ZeroDimension,

    #[error("Vector index capacity must be greater than zero")]
    ZeroCapacity,

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("The null id cannot be indexed")]
    NullId,

    #[error("Vector index full ({capacity} slots)")]
    CapacityExhausted { capacity: usize },

    #[error("No vector stored for {0}")]
    NotFound(Id),

    #[error("Cannot allocate {capacity} vectors of dimension {dimension}")]
    AllocationFailed { capacity: usize, dimension: usize },
}

pub type VectorResult<T> = Result<T, VectorError>;

/// Shape of a [`VectorIndex`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorConfig {
    /// Number of components per vector
    pub dimension: usize,
    /// Maximum number of stored vectors
    pub capacity: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            dimension: 128,
            capacity: 1024,
        }
    }
}

/// One `knn` hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub id: Id,
    /// Squared Euclidean distance to the query
    pub distance: f32,
}

impl Neighbor {
    /// Distance ascending, then id ascending
    fn rank(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.id.cmp(&other.id))
    }
}

/// Squared Euclidean distance over the common prefix of `a` and `b`
///
/// NaN is reported as positive infinity so it ranks last.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    let dist: f32 = a
        .iter()
        .zip(b)
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum();
    if dist.is_nan() { f32::INFINITY } else { dist }
}

/// `len` copies of `value`, or `None` when the buffer cannot be allocated
fn filled<T: Clone>(value: T, len: usize) -> Option<Vec<T>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len).ok()?;
    buf.resize(len, value);
    Some(buf)
}

/// Dense slot table mapping ids to fixed-dimension vectors
#[derive(Debug, Clone)]
pub struct VectorIndex {
    dimension: usize,
    /// Slot owner, `Id::NULL` when vacant
    ids: Vec<Id>,
    data: Vec<f32>,
    slots: FxHashMap<Id, usize>,
}

impl VectorIndex {
    /// Create a new vector index
    pub fn new(dimension: usize, capacity: usize) -> VectorResult<Self> {
        if dimension == 0 {
            return Err(VectorError::ZeroDimension);
        }
        if capacity == 0 {
            return Err(VectorError::ZeroCapacity);
        }
        let failed = VectorError::AllocationFailed {
            capacity,
            dimension,
        };
        let len = capacity.checked_mul(dimension).ok_or(failed.clone())?;
        let ids = filled(Id::NULL, capacity).ok_or(failed.clone())?;
        let data = filled(0.0, len).ok_or(failed)?;
        debug!("Created vector index (dimension: {}, capacity: {})", dimension, capacity);

        Ok(Self {
            dimension,
            ids,
            data,
            slots: FxHashMap::default(),
        })
    }

    pub fn with_config(config: &VectorConfig) -> VectorResult<Self> {
        Self::new(config.dimension, config.capacity)
    }

    /// Insert or overwrite the vector stored under `id`
    ///
    /// Overwrites happen in place and never consume another slot.
    pub fn set(&mut self, id: impl Into<Id>, vector: &[f32]) -> VectorResult<()> {
        let id = id.into();
        if id.is_null() {
            return Err(VectorError::NullId);
        }
        self.check_dimension(vector)?;

        let slot = match self.slots.get(&id) {
            Some(&slot) => slot,
            None => {
                let Some(slot) = self.ids.iter().position(|owner| owner.is_null()) else {
                    debug!("Vector index full, rejecting {}", id);
                    return Err(VectorError::CapacityExhausted {
                        capacity: self.capacity(),
                    });
                };
                self.ids[slot] = id;
                self.slots.insert(id, slot);
                slot
            }
        };
        self.slot_mut(slot).copy_from_slice(vector);
        trace!("Stored vector for {} in slot {}", id, slot);
        Ok(())
    }

    /// Whether `vector` could be stored under an id not yet in the index
    pub fn ensure_room(&self, vector: &[f32]) -> VectorResult<()> {
        self.check_dimension(vector)?;
        if self.len() >= self.capacity() {
            return Err(VectorError::CapacityExhausted {
                capacity: self.capacity(),
            });
        }
        Ok(())
    }

    /// Copy of the vector stored under `id`
    pub fn get(&self, id: impl Into<Id>) -> Option<Vec<f32>> {
        let slot = *self.slots.get(&id.into())?;
        Some(self.slot(slot).to_vec())
    }

    pub fn contains(&self, id: impl Into<Id>) -> bool {
        self.slots.contains_key(&id.into())
    }

    /// Vacate the slot held by `id`
    pub fn remove(&mut self, id: impl Into<Id>) -> VectorResult<()> {
        let id = id.into();
        let slot = self.slots.remove(&id).ok_or(VectorError::NotFound(id))?;
        self.ids[slot] = Id::NULL;
        self.slot_mut(slot).fill(0.0);
        trace!("Removed vector for {} from slot {}", id, slot);
        Ok(())
    }

    /// The `k` stored vectors closest to `query`
    ///
    /// Returns `min(k, len())` hits sorted by distance, ties broken by id.
    pub fn knn(&self, query: &[f32], k: usize) -> VectorResult<Vec<Neighbor>> {
        self.check_dimension(query)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut candidates: Vec<Neighbor> = self
            .iter()
            .map(|(id, vector)| Neighbor {
                id,
                distance: squared_l2(vector, query),
            })
            .collect();

        if k < candidates.len() {
            candidates.select_nth_unstable_by(k, Neighbor::rank);
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(Neighbor::rank);
        Ok(candidates)
    }

    /// Occupied slots in physical order
    pub fn iter(&self) -> impl Iterator<Item = (Id, &[f32])> + '_ {
        self.ids
            .iter()
            .zip(self.data.chunks_exact(self.dimension))
            .filter(|(id, _)| !id.is_null())
            .map(|(&id, vector)| (id, vector))
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn capacity(&self) -> usize {
        self.ids.len()
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn check_dimension(&self, vector: &[f32]) -> VectorResult<()> {
        if vector.len() != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                got: vector.len(),
            });
        }
        Ok(())
    }

    fn slot(&self, slot: usize) -> &[f32] {
        let start = slot * self.dimension;
        &self.data[start..start + self.dimension]
    }

    fn slot_mut(&mut self, slot: usize) -> &mut [f32] {
        let start = slot * self.dimension;
        &mut self.data[start..start + self.dimension]
    }
}
