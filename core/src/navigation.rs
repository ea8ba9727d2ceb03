//! Step cursor over the visible-target list.
//!
//! The cursor knows nothing about targets; callers pass the current length
//! of the visible list on every move.


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
}


impl Navigator {
    pub fn new() -> Self {
        Navigator::default()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn set(&mut self, index: usize) {
        self.current = index;
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    /// Index after the current one, wrapping to 0. `None` when `count` is 0.
    pub fn forward(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        Some((self.current + 1) % count)
    }

    /// Index before the current one, wrapping to `count - 1`. `None` when
    /// `count` is 0.
    pub fn back(&self, count: usize) -> Option<usize> {
        if count == 0 {
            return None;
        }
        // A cursor left past the end by a shrinking list still lands in range.
        Some((self.current % count + count - 1) % count)
    }
}
