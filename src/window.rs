// Sliding window buffer.
//
// A plain FIFO deque: push at the tail, pop at the head. The buffer itself
// enforces no capacity; the window width is the scan loop's slide policy
// (every push that reaches the width is followed by exactly one pop), so
// after each scan step the length never exceeds the configured width.
//
// One buffer instance lives for the whole run and is threaded through every
// input source, which is what makes windows spanning a source boundary come
// out correctly.

use std::collections::VecDeque;

/// FIFO buffer holding the most recent units of the combined input stream.
#[derive(Debug, Clone, Default)]
pub struct WindowBuffer<T> {
    units: VecDeque<T>,
}

impl<T> WindowBuffer<T> {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            units: VecDeque::new(),
        }
    }

    /// Create an empty buffer with room for `width` units.
    pub fn with_capacity(width: usize) -> Self {
        Self {
            units: VecDeque::with_capacity(width),
        }
    }

    /// Append a unit at the tail.
    pub fn push(&mut self, unit: T) {
        self.units.push_back(unit);
    }

    /// Remove and return the unit at the head, if any.
    pub fn pop_front(&mut self) -> Option<T> {
        self.units.pop_front()
    }

    /// Iterate the current contents, head to tail, without mutating.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.units.iter()
    }

    /// Current element count.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// True if no units are buffered.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
