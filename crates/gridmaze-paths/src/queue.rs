//! FIFO [`Queue`] and LIFO [`Stack`].

/// A FIFO queue with amortized O(1) enqueue and dequeue.
///
/// Items are appended to a backing `Vec` and consumed by advancing a head
/// index; the consumed prefix is dropped once the head passes the midpoint.
pub struct Queue<T> {
    items: Vec<Option<T>>,
    head: usize,
}

impl<T> Queue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            head: 0,
        }
    }

    /// Number of queued items.
    #[inline]
    pub fn size(&self) -> usize {
        self.items.len() - self.head
    }

    /// Whether no items are queued.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append an item at the back.
    pub fn enqueue(&mut self, item: T) {
        self.items.push(Some(item));
    }

    /// Remove and return the front item.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn dequeue(&mut self) -> T {
        assert!(!self.is_empty(), "dequeue on an empty queue");
        let item = self.items[self.head].take();
        self.head += 1;
        if self.head * 2 >= self.items.len() {
            self.items.drain(..self.head);
            self.head = 0;
        }
        item.expect("slots before head are compacted away")
    }

    /// The front item, if any.
    pub fn peek(&self) -> Option<&T> {
        self.items.get(self.head).and_then(Option::as_ref)
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        self.items.clear();
        self.head = 0;
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A LIFO stack over a `Vec`.
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Number of items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the stack holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Push an item on top.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the top item.
    ///
    /// # Panics
    ///
    /// Panics if the stack is empty.
    pub fn pop(&mut self) -> T {
        self.items.pop().expect("pop on an empty stack")
    }

    /// The top item, if any.
    pub fn peek(&self) -> Option<&T> {
        self.items.last()
    }

    /// Mutable access to the top item, if any.
    pub fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.last_mut()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
