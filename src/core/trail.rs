//! Bounded history of recently visited grid cells.

use std::collections::VecDeque;

use super::pointer::GridCell;

/// Insertion-ordered, most-recent-last.  Never holds more than `capacity`
/// entries; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct TrailHistory {
    cells: VecDeque<GridCell>,
    capacity: usize,
}

impl TrailHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            cells: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append `cell` unless it is the one recorded last.  Returns `true` when
    /// an entry was added.
    pub fn record_if_new_cell(&mut self, cell: GridCell) -> bool {
        if self.cells.back() == Some(&cell) {
            return false;
        }
        if self.cells.len() == self.capacity {
            self.cells.pop_front();
        }
        self.cells.push_back(cell);
        true
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &GridCell> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: i64, col: i64) -> GridCell {
        GridCell { row, col }
    }

    #[test]
    fn repeated_cell_is_coalesced() {
        let mut trail = TrailHistory::new(50);
        for (x, y) in [(5.0, 5.0), (5.0, 5.0), (25.0, 5.0)] {
            trail.record_if_new_cell(GridCell::containing(x, y, 20.0));
        }
        let cells: Vec<_> = trail.iter().copied().collect();
        assert_eq!(cells, vec![cell(0, 0), cell(0, 1)]);
    }

    #[test]
    fn moves_inside_one_cell_add_at_most_one_entry() {
        let mut trail = TrailHistory::new(50);
        for i in 0..200 {
            let jitter = (i % 19) as f64;
            trail.record_if_new_cell(GridCell::containing(40.0 + jitter, 60.0 + jitter, 20.0));
        }
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn revisiting_a_non_adjacent_entry_appends() {
        let mut trail = TrailHistory::new(50);
        assert!(trail.record_if_new_cell(cell(0, 0)));
        assert!(trail.record_if_new_cell(cell(0, 1)));
        assert!(trail.record_if_new_cell(cell(0, 0)));
        assert_eq!(trail.len(), 3);
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut trail = TrailHistory::new(50);
        for col in 0..500 {
            trail.record_if_new_cell(cell(0, col));
            assert!(trail.len() <= trail.capacity());
        }
        assert_eq!(trail.len(), 50);
        assert_eq!(trail.iter().next(), Some(&cell(0, 450)));
        assert_eq!(trail.iter().last(), Some(&cell(0, 499)));
    }

    #[test]
    fn clear_empties() {
        let mut trail = TrailHistory::new(3);
        trail.record_if_new_cell(cell(1, 1));
        trail.clear();
        assert!(trail.is_empty());
        // The coalescing reference is gone too.
        assert!(trail.record_if_new_cell(cell(1, 1)));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut trail = TrailHistory::new(0);
        trail.record_if_new_cell(cell(0, 0));
        trail.record_if_new_cell(cell(0, 1));
        assert_eq!(trail.len(), 1);
    }
}
