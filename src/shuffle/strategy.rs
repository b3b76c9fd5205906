/// Traversal contract an engine follows to pick neighbouring slots
///
/// `None` marks either end of the order.
pub trait ShuffleStrategy: Send + Sync {
    /// Number of slots covered
    fn len(&self) -> usize;

    /// Check if the order covers no slots
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slot played after `index`
    fn next(&self, index: usize) -> Option<usize>;

    /// Slot played before `index`
    fn previous(&self, index: usize) -> Option<usize>;

    /// First slot of the order
    fn first(&self) -> Option<usize>;

    /// Last slot of the order
    fn last(&self) -> Option<usize>;
}

/// Plain timeline order, used while shuffle is off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearOrder {
    len: usize,
}

impl LinearOrder {
    /// Sequential order over `len` slots
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ShuffleStrategy for LinearOrder {
    fn len(&self) -> usize {
        self.len
    }

    fn next(&self, index: usize) -> Option<usize> {
        index.checked_add(1).filter(|&next| next < self.len)
    }

    fn previous(&self, index: usize) -> Option<usize> {
        if index < self.len {
            index.checked_sub(1)
        } else {
            None
        }
    }

    fn first(&self) -> Option<usize> {
        (self.len > 0).then_some(0)
    }

    fn last(&self) -> Option<usize> {
        self.len.checked_sub(1)
    }
}
