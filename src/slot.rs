/// Marker stored in the `prev` link of a slot sitting in the free chain.
pub const FREE_MARKER: usize = usize::MAX;

/// Index of the sentinel slot. Also the "no free slot" value of the free
/// chain head.
pub const SENTINEL: usize = 0;

/// One position of the arena.
///
/// A slot is exactly one of: the sentinel (index 0), a live element
/// (`value` is `Some`), or a free slot (`value` is `None` and `prev` is
/// [`FREE_MARKER`]). For free slots `next` threads the free chain; for the
/// sentinel and live slots `next`/`prev` are the logical neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<T> {
    /// Payload, `None` for the sentinel and for free slots.
    pub value: Option<T>,
    /// Logical successor, or the next free slot.
    pub next: usize,
    /// Logical predecessor, or [`FREE_MARKER`].
    pub prev: usize,
}

impl<T> Slot<T> {
    pub(crate) const fn sentinel(next: usize, prev: usize) -> Self {
        Self {
            value: None,
            next,
            prev,
        }
    }

    pub(crate) const fn free(next: usize) -> Self {
        Self {
            value: None,
            next,
            prev: FREE_MARKER,
        }
    }

    pub(crate) const fn live(value: T, next: usize, prev: usize) -> Self {
        Self {
            value: Some(value),
            next,
            prev,
        }
    }

    /// Returns `true` if the slot is in the free chain.
    #[must_use]
    pub const fn is_free(&self) -> bool {
        self.prev == FREE_MARKER
    }

    /// Returns `true` if the slot holds a live element.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        !self.is_free() && self.value.is_some()
    }
}
