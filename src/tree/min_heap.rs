use alloc::vec::Vec;

use crate::common::Frequency;

/// Anything that can be ordered in a [`MinHeap`]
pub trait Weighted {
    fn weight(&self) -> Frequency;
}

/// Array backed binary min-heap, ordered by [`Weighted::weight`] only.
///
/// Elements of equal weight are not ordered relative to each other. The
/// comparisons are strict, so for the same sequence of operations the
/// same element is always extracted.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    elements: Vec<T>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HeapError {
    #[error("Tried to extract the minimum of an empty heap")]
    EmptyHeap,
}

impl<T: Weighted> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Weighted> MinHeap<T> {
    pub fn new() -> Self {
        MinHeap {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The element `extract_min` would return next
    pub fn peek(&self) -> Option<&T> {
        self.elements.first()
    }

    /// Add `value` to the heap. O(log n)
    pub fn insert(&mut self, value: T) {
        self.elements.push(value);
        self.sift_up(self.elements.len() - 1);
    }

    /// Remove and return an element of minimum weight. O(log n)
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.elements.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop().ok_or(HeapError::EmptyHeap)?;
        self.sift_down(0);
        Ok(min)
    }

    /// Check the heap property: no element weighs less than its parent
    pub fn is_valid(&self) -> bool {
        (1..self.elements.len())
            .all(|idx| self.elements[parent(idx)].weight() <= self.elements[idx].weight())
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let p = parent(idx);
            if self.elements[idx].weight() < self.elements[p].weight() {
                self.elements.swap(idx, p);
                idx = p;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.elements.len();
        loop {
            let l = left(idx);
            let r = right(idx);

            // pick the smaller child, preferring the left one on ties
            let mut smallest = idx;
            if l < len && self.elements[l].weight() < self.elements[smallest].weight() {
                smallest = l;
            }
            if r < len && self.elements[r].weight() < self.elements[smallest].weight() {
                smallest = r;
            }

            if smallest == idx {
                break;
            }
            self.elements.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T: Weighted> Extend<T> for MinHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, values: I) {
        for value in values {
            self.insert(value);
        }
    }
}

fn parent(idx: usize) -> usize {
    (idx - 1) / 2
}

fn left(idx: usize) -> usize {
    2 * idx + 1
}

fn right(idx: usize) -> usize {
    2 * idx + 2
}

#[cfg(test)]
mod tests {
    use super::{HeapError, MinHeap, Weighted};
    use crate::common::Frequency;
    use alloc::vec::Vec;
    use rand::{Rng, SeedableRng};

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Item {
        weight: Frequency,
        id: usize,
    }

    impl Weighted for Item {
        fn weight(&self) -> Frequency {
            self.weight
        }
    }

    fn item(weight: Frequency, id: usize) -> Item {
        Item { weight, id }
    }

    #[test]
    fn extracts_in_ascending_order() {
        let mut heap = MinHeap::new();
        for (id, weight) in [45, 5, 16, 12, 9, 13].iter().copied().enumerate() {
            heap.insert(item(weight, id));
        }
        assert_eq!(heap.size(), 6);
        assert_eq!(heap.peek().map(|i| i.weight), Some(5));

        let mut weights = Vec::new();
        while !heap.is_empty() {
            weights.push(heap.extract_min().unwrap().weight);
        }
        assert_eq!(weights, [5, 9, 12, 13, 16, 45]);
    }

    #[test]
    fn empty_heap() {
        let mut heap = MinHeap::<Item>::new();
        assert!(heap.is_empty());
        assert!(heap.peek().is_none());
        assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));

        heap.insert(item(1, 0));
        assert_eq!(heap.extract_min().unwrap().id, 0);
        assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
    }

    #[test]
    fn equal_weights_are_deterministic() {
        let run = || {
            let mut heap = MinHeap::new();
            heap.extend((0..16).map(|id| item(3, id)));
            (0..16)
                .map(|_| heap.extract_min().unwrap().id)
                .collect::<Vec<_>>()
        };
        let first = run();
        assert_eq!(first, run());
        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..16).collect::<Vec<_>>());
    }

    #[test]
    fn heap_property_holds_under_random_operations() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(0xDEADBEEF);
        let mut heap = MinHeap::with_capacity(512);
        let mut shadow: Vec<Frequency> = Vec::new();

        for id in 0..5000 {
            if rng.gen_bool(0.6) || heap.is_empty() {
                let weight = rng.gen_range(0..100);
                heap.insert(item(weight, id));
                shadow.push(weight);
            } else {
                let min = heap.extract_min().unwrap();
                let expected = *shadow.iter().min().unwrap();
                assert_eq!(min.weight, expected);
                let pos = shadow.iter().position(|w| *w == expected).unwrap();
                shadow.swap_remove(pos);
            }
            assert!(heap.is_valid());
            assert_eq!(heap.size(), shadow.len());
        }
    }
}
