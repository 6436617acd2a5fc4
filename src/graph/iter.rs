//! Iterators over graph entities
//!
//! Both kinds borrow the store immutably, so the graph cannot change while a
//! walk is in progress. Each call to the store hands out a fresh iterator
//! positioned at the start.

use super::edge::Edge;
use super::order::CreationOrder;
use super::types::{Direction, EdgeId};
use crate::arena::{Arena, Id};
use std::iter::FusedIterator;
use std::marker::PhantomData;

/// Walks a creation-order list, yielding ids that are still live
pub struct EntityIter<'a, R, I> {
    records: &'a Arena<R>,
    order: &'a CreationOrder,
    cursor: usize,
    _id: PhantomData<I>,
}

impl<'a, R, I> EntityIter<'a, R, I> {
    pub(crate) fn new(records: &'a Arena<R>, order: &'a CreationOrder) -> Self {
        EntityIter {
            records,
            order,
            cursor: 0,
            _id: PhantomData,
        }
    }
}

impl<R, I: From<Id>> Iterator for EntityIter<'_, R, I> {
    type Item = I;

    fn next(&mut self) -> Option<I> {
        while let Some(id) = self.order.get(self.cursor) {
            self.cursor += 1;
            // Recorded ids are re-validated before they are yielded
            if self.records.contains(id) {
                return Some(I::from(id));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.order.len().saturating_sub(self.cursor)))
    }
}

impl<R, I: From<Id>> FusedIterator for EntityIter<'_, R, I> {}

/// Follows one intrusive adjacency list from its head
pub struct AdjacencyIter<'a> {
    edges: &'a Arena<Edge>,
    current: Option<EdgeId>,
    direction: Direction,
}

impl<'a> AdjacencyIter<'a> {
    pub(crate) fn new(edges: &'a Arena<Edge>, head: Option<EdgeId>, direction: Direction) -> Self {
        AdjacencyIter {
            edges,
            current: head,
            direction,
        }
    }
}

impl Iterator for AdjacencyIter<'_> {
    type Item = EdgeId;

    fn next(&mut self) -> Option<EdgeId> {
        let id = self.current?;
        match self.edges.get(id.into()) {
            Some(edge) => {
                self.current = edge.next(self.direction);
                Some(id)
            }
            None => {
                self.current = None;
                None
            }
        }
    }
}

impl FusedIterator for AdjacencyIter<'_> {}
