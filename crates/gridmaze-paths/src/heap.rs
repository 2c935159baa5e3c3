//! Binary min-heap ordered by a caller-supplied key.

/// A binary min-heap over a `Vec`, ordered by `key(&item)`.
///
/// Ties are broken by heap structure only; there is no secondary key, so
/// equal-key items come out in no particular order. Searches that need FIFO
/// tie-breaking use [`Queue`](crate::Queue) instead.
pub struct MinHeap<T, K = fn(&T) -> f64> {
    items: Vec<T>,
    key: K,
}

impl<T, K: Fn(&T) -> f64> MinHeap<T, K> {
    /// Create an empty heap ordered by `key`.
    pub fn new(key: K) -> Self {
        Self {
            items: Vec::new(),
            key,
        }
    }

    /// Create an empty heap with room for `cap` items.
    pub fn with_capacity(cap: usize, key: K) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            key,
        }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// The smallest item, if any.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Add an item.
    pub fn insert(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the smallest item.
    ///
    /// # Panics
    ///
    /// Panics if the heap is empty. Callers check
    /// [`is_empty`](Self::is_empty) first.
    pub fn extract_min(&mut self) -> T {
        assert!(!self.items.is_empty(), "extract_min on an empty heap");
        let min = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        min
    }

    fn less(&self, a: usize, b: usize) -> bool {
        (self.key)(&self.items[a]) < (self.key)(&self.items[b])
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.less(i, parent) {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut smallest = i;
            if left < n && self.less(left, smallest) {
                smallest = left;
            }
            if right < n && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.items.swap(i, smallest);
            i = smallest;
        }
    }
}
