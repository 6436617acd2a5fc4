//! Vector search
//!
//! Exact k-nearest-neighbour search over fixed-dimension `f32` vectors keyed
//! by the same [`Id`](crate::arena::Id) space the graph store hands out.

pub mod index;

pub use index::{squared_l2, Neighbor, VectorConfig, VectorError, VectorIndex, VectorResult};
