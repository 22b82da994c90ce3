use crate::slot::{SENTINEL, Slot};
use crate::{ArenaList, CheckStage, ListError, Violations};

impl<T> ArenaList<T> {
    /// Rewrites the arena so that the `k`-th element sits in slot `k`.
    ///
    /// Afterwards [`logical_to_physical`](ArenaList::logical_to_physical)
    /// is O(1) and the free chain holds `len() + 1..=capacity()` in
    /// ascending order. Existing [`Idx`](crate::Idx) handles may point at
    /// different elements after this call.
    ///
    /// Runs in O(len) moves with one fresh allocation of the full
    /// capacity. Calling it twice in a row yields the same layout.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if the fresh arena cannot be allocated
    /// (the list is then unchanged), or a
    /// [`ListError::StructuralCorruption`] reported by the checker.
    pub fn linearize(&mut self) -> Result<(), ListError> {
        self.enter()?;
        self.relayout()?;
        self.leave()
    }

    pub(crate) fn relayout(&mut self) -> Result<(), ListError> {
        let cap = self.capacity;
        let size = self.size;

        let mut fresh: Vec<Slot<T>> = Vec::new();
        fresh
            .try_reserve_exact(cap + 1)
            .map_err(|_| ListError::OutOfMemory { requested: cap + 1 })?;

        let first = if size == 0 { SENTINEL } else { 1 };
        fresh.push(Slot::sentinel(first, size));

        let mut cur = self.head;
        for i in 1..=size {
            let Some(old) = self.slots.get_mut(cur) else {
                return Err(ListError::StructuralCorruption {
                    stage: CheckStage::Exit,
                    violations: Violations::LIVE_CHAIN_CORRUPT,
                });
            };
            let next = if i == size { SENTINEL } else { i + 1 };
            fresh.push(Slot {
                value: old.value.take(),
                next,
                prev: i - 1,
            });
            cur = old.next;
        }
        for i in size + 1..=cap {
            let next = if i == cap { SENTINEL } else { i + 1 };
            fresh.push(Slot::free(next));
        }

        self.slots = fresh;
        self.sync_ends();
        self.free_head = if size == cap { SENTINEL } else { size + 1 };
        self.free_count = cap - size;
        self.linearized = true;

        tracing::debug!(capacity = cap, size, "linearized arena");
        Ok(())
    }
}
