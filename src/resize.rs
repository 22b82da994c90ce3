//! Capacity management: automatic grow/shrink and the explicit variants.

use crate::slot::{SENTINEL, Slot};
use crate::{ArenaList, ListError};

impl<T> ArenaList<T> {
    /// Grows to `2 * capacity + 1` slots.
    pub(crate) fn grow(&mut self) -> Result<(), ListError> {
        let target = self
            .capacity
            .checked_mul(2)
            .and_then(|c| c.checked_add(1))
            .ok_or(ListError::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.grow_to(target)
    }

    /// Extends the arena to `target` slots. New slots join the end of the
    /// free chain. No-op if `target` is not larger than the capacity.
    pub(crate) fn grow_to(&mut self, target: usize) -> Result<(), ListError> {
        let old = self.capacity;
        if target <= old {
            return Ok(());
        }
        let additional = target - old;
        self.slots
            .try_reserve_exact(additional)
            .map_err(|_| ListError::OutOfMemory { requested: target })?;

        self.slots
            .extend((old + 1..=target).map(|_| Slot::free(SENTINEL)));
        self.capacity = target;
        self.append_free_run(old + 1, target);

        tracing::debug!(from = old, to = target, size = self.size, "grew arena");
        Ok(())
    }

    /// Halves capacity when the list is linearized and between a quarter
    /// and a half full.
    ///
    /// Skipped when the live run would not fit in the smaller arena.
    pub(crate) fn maybe_shrink(&mut self) {
        let cap = self.capacity;
        if !self.linearized || cap / 4 > self.size || self.size + 1 >= cap / 2 {
            return;
        }
        let target = cap / 2 + 1;
        if self.tail > target {
            return;
        }
        self.truncate_to(target);
    }

    /// Cuts the arena to `target` slots and rebuilds the free chain.
    ///
    /// Only valid for a linearized list whose tail is within `target`.
    fn truncate_to(&mut self, target: usize) {
        let old = self.capacity;
        self.slots.truncate(target + 1);
        self.slots.shrink_to_fit();
        self.capacity = target;
        self.rebuild_free_chain();
        tracing::debug!(from = old, to = target, size = self.size, "shrank arena");
    }

    /// Makes room for at least `additional` more elements without
    /// triggering automatic growth.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if the arena cannot grow, or a
    /// [`ListError::StructuralCorruption`] reported by the checker.
    pub fn reserve(&mut self, additional: usize) -> Result<(), ListError> {
        self.enter()?;
        let target = self
            .size
            .checked_add(additional)
            .and_then(|n| n.checked_add(1))
            .ok_or(ListError::OutOfMemory {
                requested: usize::MAX,
            })?;
        self.grow_to(target)?;
        self.leave()
    }

    /// Linearizes the list and trims the arena to `max(len, 1)` slots.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if linearization cannot allocate, or a
    /// [`ListError::StructuralCorruption`] reported by the checker.
    pub fn shrink_to_fit(&mut self) -> Result<(), ListError> {
        self.enter()?;
        self.relayout()?;
        let target = self.size.max(1);
        if target < self.capacity {
            self.truncate_to(target);
        }
        self.leave()
    }
}
