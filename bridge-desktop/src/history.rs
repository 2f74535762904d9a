//! Bounded buffer for the records the desktop shims keep.

use std::collections::VecDeque;

/// Records kept per shim unless configured otherwise.
pub const DEFAULT_HISTORY: usize = 1_000;

/// FIFO that drops its oldest entry once full.
#[derive(Debug)]
pub(crate) struct History<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl<T: Clone> History<T> {
    /// A zero capacity is raised to one.
    pub(crate) fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY)),
            capacity,
        }
    }

    pub(crate) fn push(&mut self, item: T) {
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(item);
    }

    pub(crate) fn snapshot(&self) -> Vec<T> {
        self.items.iter().cloned().collect()
    }

    pub(crate) fn drain(&mut self) -> Vec<T> {
        self.items.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_entries_are_evicted() {
        let mut history = History::new(3);
        for n in 0..5 {
            history.push(n);
        }

        assert_eq!(history.snapshot(), vec![2, 3, 4]);
    }

    #[test]
    fn test_drain_empties() {
        let mut history = History::new(0);
        history.push("a");
        history.push("b");

        assert_eq!(history.drain(), vec!["b"]);
        assert!(history.snapshot().is_empty());
    }
}
