use crate::{Slot, Violations, verify};

/// Read-only view of every field of an [`ArenaList`](crate::ArenaList).
///
/// Obtained from [`ArenaList::snapshot`](crate::ArenaList::snapshot).
/// Intended for diagnostic tooling that renders the arena. The fields are
/// public so a snapshot can also be assembled by hand and fed to
/// [`check`](crate::check).
pub struct Snapshot<'a, T> {
    /// Allocatable slots, sentinel excluded.
    pub capacity: usize,
    /// Live element count.
    pub size: usize,
    /// Slots currently in the free chain.
    pub free_count: usize,
    /// Cached logical head (0 when empty).
    pub head: usize,
    /// Cached logical tail (0 when empty).
    pub tail: usize,
    /// First slot of the free chain (0 when none).
    pub free_head: usize,
    /// Whether logical order is claimed to match physical order.
    pub linearized: bool,
    /// The whole arena, sentinel at index 0.
    pub slots: &'a [Slot<T>],
}

impl<T> Snapshot<'_, T> {
    /// Runs the invariant checker over this snapshot.
    #[must_use]
    pub fn violations(&self) -> Violations {
        verify::check(self)
    }
}

impl<T> Clone for Snapshot<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Snapshot<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for Snapshot<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("capacity", &self.capacity)
            .field("size", &self.size)
            .field("free_count", &self.free_count)
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("free_head", &self.free_head)
            .field("linearized", &self.linearized)
            .field("slots", &self.slots)
            .finish()
    }
}
