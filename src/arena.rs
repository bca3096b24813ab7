use crate::handle::Handle;

/// Slot storage for tree nodes. Elements are only ever added one at a time and removed all at
/// once, except by a consuming iterator which empties slots with [`Arena::take`].
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of slots handed out since the last [`Arena::clear`].
    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::MAX
        );
        self.slots.push(Some(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        self.slots[handle.to_index()]
            .as_ref()
            .expect("`Arena::get()` - `handle` is invalid!")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        self.slots[handle.to_index()]
            .as_mut()
            .expect("`Arena::get_mut()` - `handle` is invalid!")
    }

    pub(crate) fn take(&mut self, handle: Handle) -> T {
        self.slots[handle.to_index()]
            .take()
            .expect("`Arena::take()` - `handle` is invalid!")
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
