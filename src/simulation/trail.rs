//! Bounded per-body position history used to draw trails
//!
//! Each body owns a FIFO of past positions, oldest first. Appending past the
//! cap evicts from the front; a cap of 0 keeps every trail empty. Trails
//! grow on demand, the cap is never reserved up front

use std::collections::VecDeque;

use crate::error::SimError;
use crate::simulation::states::{NVec2, BODY_COUNT};

#[derive(Debug, Clone, PartialEq)]
pub struct TrailBuffer {
    trails: [VecDeque<NVec2>; BODY_COUNT],
    max_len: usize,
}

impl TrailBuffer {
    pub fn new(max_len: usize) -> Self {
        Self {
            trails: std::array::from_fn(|_| VecDeque::new()),
            max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Append `position` to the trail of body `index`, evicting the oldest
    /// point if that takes the trail over the cap
    pub fn record(&mut self, index: usize, position: NVec2) -> Result<(), SimError> {
        let max_len = self.max_len;
        let trail = self
            .trails
            .get_mut(index)
            .ok_or(SimError::BodyIndexOutOfRange { index })?;

        trail.push_back(position);
        while trail.len() > max_len {
            trail.pop_front();
        }
        Ok(())
    }

    /// Borrow the trail of body `index`, oldest point first
    pub fn trail(&self, index: usize) -> Result<&VecDeque<NVec2>, SimError> {
        self.trails
            .get(index)
            .ok_or(SimError::BodyIndexOutOfRange { index })
    }

    /// Owned copy of the trail of body `index`, oldest point first
    pub fn snapshot(&self, index: usize) -> Result<Vec<NVec2>, SimError> {
        Ok(self.trail(index)?.iter().copied().collect())
    }

    pub fn clear(&mut self) {
        for trail in self.trails.iter_mut() {
            trail.clear();
        }
    }
}
