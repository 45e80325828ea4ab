//! Short-term memory of recently visited tours.

use std::collections::VecDeque;

use crate::geometry::Point;

/// Bounded FIFO of whole tours.
///
/// Membership compares full point sequences, so every lookup costs
/// `O(len * tour_len)`. This is the hot spot of an iteration for long
/// tours; a content hash could replace the scan as long as order-sensitive
/// equality is kept.
#[derive(Debug, Clone)]
pub struct TabuList {
    entries: VecDeque<Vec<Point>>,
    capacity: usize,
}

impl TabuList {
    /// Creates an empty list holding at most `capacity` tours.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Appends `tour`, evicting the oldest entry when over capacity.
    pub fn push(&mut self, tour: Vec<Point>) {
        self.entries.push_back(tour);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Whether an identical tour is remembered.
    pub fn contains(&self, tour: &[Point]) -> bool {
        self.entries.iter().any(|t| t.as_slice() == tour)
    }

    /// Removes the oldest occurrence of `tour`. Returns whether one was found.
    pub fn remove_first(&mut self, tour: &[Point]) -> bool {
        match self.entries.iter().position(|t| t.as_slice() == tour) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[Point]> {
        self.entries.iter().map(Vec::as_slice)
    }
}
