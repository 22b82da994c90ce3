//! Intrusive free-list allocator over the slot vector.

use crate::slot::{SENTINEL, Slot};
use crate::{ArenaList, ListError};

impl<T> ArenaList<T> {
    /// Pops the head of the free chain.
    ///
    /// The returned slot is still free-marked; the caller overwrites it.
    pub(crate) fn claim(&mut self) -> Result<usize, ListError> {
        let slot = self.free_head;
        if slot == SENTINEL {
            return Err(ListError::OutOfSlots {
                capacity: self.capacity,
            });
        }
        self.free_head = self.slots[slot].next;
        self.free_count -= 1;
        tracing::trace!(slot, free = self.free_count, "claimed slot");
        Ok(slot)
    }

    /// Poisons `slot` and pushes it onto the free chain, returning the
    /// value it held.
    ///
    /// Does not touch the neighbours' links; the caller unlinks first or
    /// after.
    pub(crate) fn release(&mut self, slot: usize) -> Result<T, ListError> {
        if slot == SENTINEL || slot > self.capacity {
            return Err(ListError::InvalidSlot { slot });
        }
        let entry = &mut self.slots[slot];
        if entry.is_free() {
            return Err(ListError::DoubleFree { slot });
        }
        let value = entry.value.take().ok_or(ListError::InvalidSlot { slot })?;
        *entry = Slot::free(self.free_head);
        self.free_head = slot;
        self.free_count += 1;
        tracing::trace!(slot, free = self.free_count, "released slot");
        Ok(value)
    }

    /// Appends the slots `first..=last` to the end of the free chain, in
    /// ascending order.
    ///
    /// The slots must already exist in the vector.
    pub(crate) fn append_free_run(&mut self, first: usize, last: usize) {
        if first > last {
            return;
        }
        for i in first..last {
            self.slots[i] = Slot::free(i + 1);
        }
        self.slots[last] = Slot::free(SENTINEL);

        if self.free_head == SENTINEL {
            self.free_head = first;
        } else {
            let mut cur = self.free_head;
            // Bounded by free_count.
            for _ in 1..self.free_count {
                let next = self.slots[cur].next;
                if next == SENTINEL {
                    break;
                }
                cur = next;
            }
            self.slots[cur].next = first;
        }
        self.free_count += last - first + 1;
    }

    /// Rebuilds the free chain from scratch for a linearized list.
    ///
    /// Every slot outside the live run `head..=tail` becomes free. Slots
    /// past the tail come first in ascending order, then the slots before
    /// the head in descending order, so back and front insertions both
    /// extend the run.
    pub(crate) fn rebuild_free_chain(&mut self) {
        let (lo, hi) = if self.size == 0 {
            (1, 0)
        } else {
            (self.head, self.tail)
        };

        // Pushed to the front one by one, so iterate the final order reversed.
        let mut free_head = SENTINEL;
        for i in (1..lo).chain((hi + 1..=self.capacity).rev()) {
            self.slots[i] = Slot::free(free_head);
            free_head = i;
        }
        self.free_head = free_head;
        self.free_count = self.capacity - self.size;
    }
}
