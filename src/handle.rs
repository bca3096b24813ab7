use std::num::NonZeroU32;

/// A stable index of a node inside an [`Arena`](crate::arena::Arena).
///
/// Stored off by one so `Option<Handle>` is the same size as a `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZeroU32);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        // `index + 1` cannot be zero and, given the assert above, cannot overflow.
        Self(NonZeroU32::new((index + 1) as u32).expect("index + 1 is never zero"))
    }

    #[inline]
    pub(crate) fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}
