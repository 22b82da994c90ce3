use std::marker::PhantomData;

/// Physical slot index into an [`ArenaList`](crate::ArenaList).
///
/// Returned by the insertion methods and accepted by every positional
/// operation. Implements [`Copy`], so it can be freely stored by the caller.
///
/// The index addresses a *slot*, not a logical position: it stays valid
/// across insertions and erasures of other elements, but
/// [`linearize`](crate::ArenaList::linearize) and shrinking may move the
/// element to a different slot.
pub struct Idx<T> {
    index: usize,
    _marker: PhantomData<T>,
}

impl<T> Idx<T> {
    /// Slot 0, the permanent wrap-around point between tail and head.
    ///
    /// Valid as an insertion position (the new element becomes the head),
    /// never as a data slot.
    pub const SENTINEL: Self = Self::from_raw(0);

    /// Returns the raw index value.
    #[must_use]
    pub const fn into_raw(self) -> usize {
        self.index
    }

    /// Creates an index from a raw value.
    ///
    /// The list validates every index it receives, so a bogus value yields
    /// an error rather than undefined behaviour.
    #[must_use]
    pub const fn from_raw(index: usize) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns `true` if this is [`Idx::SENTINEL`].
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.index == 0
    }
}

impl<T> Clone for Idx<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Idx<T> {}

impl<T> PartialEq for Idx<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for Idx<T> {}

impl<T> std::hash::Hash for Idx<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> std::fmt::Debug for Idx<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_sentinel() {
            write!(f, "Idx(sentinel)")
        } else {
            write!(f, "Idx({})", self.index)
        }
    }
}

impl<T> std::fmt::Display for Idx<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl<T> PartialOrd for Idx<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Idx<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.index.cmp(&other.index)
    }
}
