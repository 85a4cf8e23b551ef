// src/frontier/queue.rs
// =============================================================================
// A priority queue that keeps its items sorted by weight, highest first.
//
// How it works:
// 1. add() finds the first entry whose weight is strictly lower than the new
//    weight and inserts right before it
// 2. Equal weights therefore queue up behind each other (FIFO among ties)
// 3. extract() always takes from the front
// 4. An item can only be in the queue once; re-adding it is a no-op
//
// With every item at the same weight this is a plain FIFO queue, which is
// exactly what breadth-first crawling needs.
//
// Rust concepts:
// - Generics: WeightedQueue<T, W> works for any item and weight type
// - Trait bounds: W: Weight lets us compare weights without knowing the type
// - VecDeque: cheap pops from the front
// =============================================================================

use super::weight::{NeutralWeight, Weight};
use std::collections::VecDeque;

/// An item together with the weight it was queued with
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEntry<T, W> {
    pub item: T,
    pub weight: W,
}

/// Items ordered by descending weight, oldest first among equal weights
#[derive(Debug, Clone)]
pub struct WeightedQueue<T, W> {
    entries: VecDeque<WeightedEntry<T, W>>,
}

impl<T: PartialEq, W: Weight> WeightedQueue<T, W> {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    /// Adds `item` with `weight`
    ///
    /// Returns false (and leaves the queue untouched) if the item is already
    /// queued, whatever its weight.
    pub fn add_weighted(&mut self, item: T, weight: W) -> bool {
        if self.contains(&item) {
            return false;
        }

        // Entries are sorted descending, so "existing >= new" holds for a
        // prefix of the queue. The new entry goes right after that prefix.
        let position = self
            .entries
            .partition_point(|entry| entry.weight.compare(&weight).is_ge());

        self.entries.insert(position, WeightedEntry { item, weight });
        true
    }

    /// Removes and returns the highest-weight (oldest among equals) item
    pub fn extract(&mut self) -> Option<T> {
        self.extract_entry().map(|entry| entry.item)
    }

    /// Like extract(), but also hands back the weight the item was queued with
    pub fn extract_entry(&mut self) -> Option<WeightedEntry<T, W>> {
        self.entries.pop_front()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.entries.iter().any(|entry| entry.item == *item)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: PartialEq, W: NeutralWeight> WeightedQueue<T, W> {
    /// Adds `item` with the neutral weight (1.0 for floats)
    pub fn add(&mut self, item: T) -> bool {
        self.add_weighted(item, W::neutral())
    }
}

impl<T: PartialEq, W: Weight> Default for WeightedQueue<T, W> {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is partition_point?
//    - Binary search for the first element where a predicate becomes false
//    - Requires the predicate to be true for a prefix and false afterwards
//    - Our entries are sorted descending, so "weight >= new weight" fits
//
// 2. Why two impl blocks?
//    - The second block only applies when W: NeutralWeight
//    - So add(item) simply doesn't exist for a WeightedQueue<_, String>
//    - Misuse becomes a compile error instead of a runtime failure
//
// 3. Why Option<T> from extract()?
//    - An empty queue has nothing to give back
//    - None is the type-safe way to say so (no panics, no sentinel values)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_weights_are_fifo() {
        let mut q: WeightedQueue<&str, f64> = WeightedQueue::new();
        q.add("first");
        q.add("second");
        q.add("third");

        assert_eq!(q.extract(), Some("first"));
        assert_eq!(q.extract(), Some("second"));
        assert_eq!(q.extract(), Some("third"));
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_weighted_order() {
        let mut q: WeightedQueue<&str, f64> = WeightedQueue::new();
        q.add_weighted("light", 0.05);
        q.add_weighted("heavy", 1.0);
        q.add_weighted("medium", 0.2);

        assert_eq!(q.extract(), Some("heavy"));
        assert_eq!(q.extract(), Some("medium"));
        assert_eq!(q.extract(), Some("light"));
        assert_eq!(q.len(), 0);
    }

    #[test]
    fn test_ties_stay_behind_earlier_entries() {
        let mut q: WeightedQueue<&str, f64> = WeightedQueue::new();
        q.add_weighted("a", 0.5);
        q.add_weighted("b", 0.25);
        q.add_weighted("c", 0.5);
        q.add_weighted("d", 1.0);
        q.add_weighted("e", 0.25);

        let order: Vec<_> = std::iter::from_fn(|| q.extract()).collect();
        assert_eq!(order, vec!["d", "a", "c", "b", "e"]);
    }

    #[test]
    fn test_duplicate_is_rejected() {
        let mut q: WeightedQueue<String, f64> = WeightedQueue::new();
        assert!(q.add_weighted("/wiki/Neo".to_string(), 0.2));
        assert!(!q.add_weighted("/wiki/Neo".to_string(), 1.0));
        assert!(!q.add("/wiki/Neo".to_string()));
        assert_eq!(q.len(), 1);

        // The first weight wins
        let entry = q.extract_entry().unwrap();
        assert_eq!(entry.weight, 0.2);
    }

    #[test]
    fn test_size_tracks_adds_rejections_and_extracts() {
        let mut q: WeightedQueue<u32, f64> = WeightedQueue::new();
        for i in 0..5 {
            q.add_weighted(i, f64::from(i) / 10.0);
        }
        q.add(3);
        assert_eq!(q.len(), 5);

        q.extract();
        q.extract();
        assert_eq!(q.len(), 3);
        assert!(!q.is_empty());
    }

    #[test]
    fn test_extract_empty_returns_none() {
        let mut q: WeightedQueue<&str, f64> = WeightedQueue::new();
        assert_eq!(q.extract(), None);
        assert!(q.is_empty());
    }

    #[test]
    fn test_non_numeric_weights() {
        let mut q: WeightedQueue<&str, String> = WeightedQueue::new();
        q.add_weighted("apple", "a".to_string());
        q.add_weighted("zebra", "z".to_string());
        q.add_weighted("mango", "m".to_string());

        assert_eq!(q.extract(), Some("zebra"));
        assert_eq!(q.extract(), Some("mango"));
        assert_eq!(q.extract(), Some("apple"));
    }
}
