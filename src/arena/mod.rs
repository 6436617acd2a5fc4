//! Fixed-capacity generational arena
//!
//! Slots are addressed by index and tagged with a generation counter. Freed
//! slots go onto a LIFO free list and are reused before any untouched slot is
//! bump-allocated, so an arena never grows past the capacity it was built with.
//! Every successful allocation bumps the slot's generation, which is what makes
//! stale [`Id`]s fail `get`, `contains` and `free`.

pub mod id;

pub use id::Id;

use thiserror::Error;

/// Errors raised when building an arena
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("arena capacity must be greater than zero")]
    ZeroCapacity,

    #[error("arena capacity {0} exceeds the 32-bit slot index space")]
    CapacityOverflow(usize),
}

pub type ArenaResult<T> = Result<T, ArenaError>;

#[derive(Debug, Clone)]
struct Slot<T> {
    value: T,
    generation: u32,
    occupied: bool,
    next_free: Option<u32>,
}

/// Slot table of `T` records with O(1) allocate, free and checked lookup
#[derive(Debug, Clone)]
pub struct Arena<T> {
    /// Touched slots; `slots.len()` is the bump pointer
    slots: Vec<Slot<T>>,
    capacity: u32,
    free_head: Option<u32>,
    len: usize,
}

impl<T: Default> Arena<T> {
    /// Create an arena able to hold `capacity` live records
    pub fn new(capacity: usize) -> ArenaResult<Self> {
        if capacity == 0 {
            return Err(ArenaError::ZeroCapacity);
        }
        let capacity = u32::try_from(capacity).map_err(|_| ArenaError::CapacityOverflow(capacity))?;

        // Slots are pushed on first use, so a large capacity costs nothing up front
        Ok(Arena {
            slots: Vec::new(),
            capacity,
            free_head: None,
            len: 0,
        })
    }

    /// Allocate a default-initialized record
    ///
    /// Returns `None` once every slot is live.
    pub fn allocate(&mut self) -> Option<(Id, &mut T)> {
        let index = self.next_index()?;
        let slot = &mut self.slots[index as usize];
        slot.generation = next_generation(slot.generation);
        slot.occupied = true;
        slot.next_free = None;
        slot.value = T::default();
        self.len += 1;

        Some((Id::from_parts(index, slot.generation), &mut slot.value))
    }

    /// Release the record behind `id`, resetting it to its default value
    pub fn free(&mut self, id: Id) -> bool {
        let Some(index) = self.live_index(id) else {
            return false;
        };
        let slot = &mut self.slots[index];
        slot.value = T::default();
        slot.occupied = false;
        slot.next_free = self.free_head;
        self.free_head = Some(index as u32);
        self.len -= 1;
        true
    }

    fn next_index(&mut self) -> Option<u32> {
        if let Some(index) = self.free_head {
            self.free_head = self.slots[index as usize].next_free;
            return Some(index);
        }
        let index = u32::try_from(self.slots.len()).ok().filter(|&i| i < self.capacity)?;
        self.slots.push(Slot {
            value: T::default(),
            generation: 0,
            occupied: false,
            next_free: None,
        });
        Some(index)
    }
}

impl<T> Arena<T> {
    pub fn get(&self, id: Id) -> Option<&T> {
        self.live_index(id).map(|index| &self.slots[index].value)
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        self.live_index(id).map(|index| &mut self.slots[index].value)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.live_index(id).is_some()
    }

    /// Number of live records
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity as usize
    }

    /// Validates index range, occupancy and generation
    fn live_index(&self, id: Id) -> Option<usize> {
        let index = id.index()? as usize;
        let slot = self.slots.get(index)?;
        (slot.occupied && slot.generation == id.generation()).then_some(index)
    }
}

/// Generations start at 1 and skip 0 when the counter wraps
fn next_generation(generation: u32) -> u32 {
    match generation.wrapping_add(1) {
        0 => 1,
        next => next,
    }
}
