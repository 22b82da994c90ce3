use crate::slot::{SENTINEL, Slot};
use crate::{CheckStage, Idx, Iter, ListConfig, ListError, Snapshot, Values, Violations, verify};

/// Doubly linked list stored in a single contiguous arena.
///
/// Elements live in slots of one [`Vec`]; links are slot indices. Slot 0
/// is a sentinel whose `next`/`prev` are the head and tail. Unused slots
/// form an intrusive free chain, so insertion and erasure never touch the
/// allocator unless the resize policy fires.
///
/// Positions are physical [`Idx<T>`] handles. Logical positions (1st,
/// 2nd, … element) are translated with
/// [`logical_to_physical`](ArenaList::logical_to_physical), which is O(1)
/// while the list is [linearized](ArenaList::is_linearized) and O(k)
/// otherwise.
///
/// With [`ListConfig::verify`] on, every mutating call re-checks the whole
/// arena on entry and exit and reports corruption as
/// [`ListError::StructuralCorruption`].
///
/// # Example
///
/// ```
/// use arena_list::ArenaList;
///
/// let mut list = ArenaList::new(5).unwrap();
/// list.insert_front(1).unwrap();
/// let four = list.insert_front(4).unwrap();
/// list.insert_front(9).unwrap();
///
/// let values: Vec<_> = list.values().copied().collect();
/// assert_eq!(values, [9, 4, 1]);
///
/// assert_eq!(list.erase(four).unwrap(), 4);
/// let second = list.logical_to_physical(2).unwrap();
/// assert_eq!(list.get(second).unwrap(), &1);
/// ```
#[derive(Clone)]
pub struct ArenaList<T> {
    pub(crate) slots: Vec<Slot<T>>,
    pub(crate) capacity: usize,
    pub(crate) size: usize,
    pub(crate) free_count: usize,
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) free_head: usize,
    pub(crate) linearized: bool,
    pub(crate) config: ListConfig,
}

impl<T> ArenaList<T> {
    /// Creates an empty list with `capacity` slots and default settings.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidCapacity`] if `capacity` is zero,
    /// [`ListError::OutOfMemory`] if the arena cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self, ListError> {
        Self::with_config(ListConfig::new(capacity))
    }

    /// Creates an empty list from `config`.
    ///
    /// Every slot starts in the free chain.
    ///
    /// # Errors
    ///
    /// Same as [`new`](ArenaList::new).
    pub fn with_config(config: ListConfig) -> Result<Self, ListError> {
        let capacity = config.capacity;
        if capacity == 0 {
            return Err(ListError::InvalidCapacity);
        }
        let len = capacity
            .checked_add(1)
            .ok_or(ListError::OutOfMemory { requested: capacity })?;

        let mut slots = Vec::new();
        slots
            .try_reserve_exact(len)
            .map_err(|_| ListError::OutOfMemory { requested: len })?;

        Ok(Self::from_parts(slots, config))
    }

    fn from_parts(slots: Vec<Slot<T>>, config: ListConfig) -> Self {
        let mut list = Self {
            slots,
            capacity: config.capacity,
            size: 0,
            free_count: 0,
            head: SENTINEL,
            tail: SENTINEL,
            free_head: SENTINEL,
            linearized: true,
            config,
        };
        list.reset_slots();
        list
    }

    /// Builds a list holding the items of `iter` in order.
    ///
    /// # Errors
    ///
    /// [`ListError::OutOfMemory`] if the arena cannot grow, or a
    /// [`ListError::StructuralCorruption`] reported by the checker.
    pub fn try_from_iter(iter: impl IntoIterator<Item = T>) -> Result<Self, ListError> {
        let iter = iter.into_iter();
        let capacity = iter.size_hint().0.max(ListConfig::DEFAULT_CAPACITY);
        let mut list = Self::new(capacity)?;
        for value in iter {
            list.insert_back(value)?;
        }
        Ok(list)
    }

    /// Fills the slot vector with the initial layout: sentinel pointing at
    /// itself and every other slot free, chained from `capacity` down to 1.
    ///
    /// The descending order hands out slots so that repeated
    /// [`insert_front`](ArenaList::insert_front) calls stay linearized.
    pub(crate) fn reset_slots(&mut self) {
        self.slots.clear();
        self.slots.push(Slot::sentinel(SENTINEL, SENTINEL));
        self.slots.extend((1..=self.capacity).map(|i| Slot::free(i - 1)));
        self.size = 0;
        self.free_count = self.capacity;
        self.free_head = self.capacity;
        self.head = SENTINEL;
        self.tail = SENTINEL;
        self.linearized = true;
    }

    /// Re-reads head and tail from the sentinel.
    pub(crate) fn sync_ends(&mut self) {
        self.head = self.slots[SENTINEL].next;
        self.tail = self.slots[SENTINEL].prev;
    }

    /// Inserts `value` right after `position` in logical order.
    ///
    /// `position` must be a live slot or [`Idx::SENTINEL`]; with the
    /// sentinel the value becomes the new head. The resize policy runs
    /// before a slot is claimed. Returns the slot the value landed in.
    ///
    /// The list stays linearized only if the new slot extends the
    /// contiguous run of live slots at the end it was inserted at.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] if `position` is out of range or
    /// free, [`ListError::OutOfSlots`] if the list is full and automatic
    /// resizing is off, [`ListError::OutOfMemory`] if growing fails.
    pub fn insert_before(&mut self, position: Idx<T>, value: T) -> Result<Idx<T>, ListError> {
        self.enter()?;

        let pos = position.into_raw();
        if pos > self.capacity || (pos != SENTINEL && !self.slots[pos].is_live()) {
            return Err(ListError::InvalidPosition { position: pos });
        }

        if self.config.auto_resize && self.size + 1 >= self.capacity {
            self.grow()?;
        }
        let slot = self.claim()?;

        let next = self.slots[pos].next;
        let extends = self.size == 0
            || (pos == SENTINEL && slot + 1 == self.head)
            || (next == SENTINEL && slot == self.tail + 1);

        self.slots[slot] = Slot::live(value, next, pos);
        self.slots[pos].next = slot;
        self.slots[next].prev = slot;
        self.size += 1;
        self.sync_ends();
        self.linearized = self.linearized && extends;

        self.leave()?;
        Ok(Idx::from_raw(slot))
    }

    /// Inserts `value` as the new head.
    ///
    /// # Errors
    ///
    /// Same as [`insert_before`](ArenaList::insert_before).
    pub fn insert_front(&mut self, value: T) -> Result<Idx<T>, ListError> {
        self.insert_before(Idx::SENTINEL, value)
    }

    /// Inserts `value` as the new tail.
    ///
    /// # Errors
    ///
    /// Same as [`insert_before`](ArenaList::insert_before).
    pub fn insert_back(&mut self, value: T) -> Result<Idx<T>, ListError> {
        self.insert_before(Idx::from_raw(self.tail), value)
    }

    /// Removes the element in `position` and returns it.
    ///
    /// The slot goes back to the head of the free chain. Erasing the head
    /// or tail keeps a linearized list linearized; erasing an interior
    /// element clears the flag.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidPosition`] for the sentinel or an out-of-range
    /// slot, [`ListError::DoubleFree`] if the slot is already free. The
    /// list is unchanged on error.
    pub fn erase(&mut self, position: Idx<T>) -> Result<T, ListError> {
        self.enter()?;

        let pos = position.into_raw();
        if pos == SENTINEL || pos > self.capacity {
            return Err(ListError::InvalidPosition { position: pos });
        }
        if self.slots[pos].is_free() {
            return Err(ListError::DoubleFree { slot: pos });
        }
        if !self.slots[pos].is_live() {
            return Err(ListError::InvalidPosition { position: pos });
        }

        if self.config.auto_resize {
            self.maybe_shrink();
        }

        let (next, prev) = (self.slots[pos].next, self.slots[pos].prev);
        let at_end = pos == self.head || pos == self.tail;
        let value = self.release(pos)?;

        self.slots[prev].next = next;
        self.slots[next].prev = prev;
        self.size -= 1;
        self.sync_ends();
        self.linearized = self.size == 0 || (self.linearized && at_end);

        self.leave()?;
        Ok(value)
    }

    /// Replaces the value in `slot`, returning the old one.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidSlot`] if `slot` is the sentinel, out of range,
    /// or free.
    pub fn set(&mut self, slot: Idx<T>, value: T) -> Result<T, ListError> {
        self.enter()?;
        let old = std::mem::replace(self.get_mut(slot)?, value);
        self.leave()?;
        Ok(old)
    }

    /// Drops every element and returns all slots to the free chain.
    ///
    /// Capacity is retained.
    ///
    /// # Errors
    ///
    /// A [`ListError::StructuralCorruption`] reported by the checker.
    pub fn clear(&mut self) -> Result<(), ListError> {
        self.enter()?;
        self.reset_slots();
        self.leave()
    }

    /// Returns the value in `slot`.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidSlot`] if `slot` is the sentinel, out of range,
    /// or free.
    pub fn get(&self, slot: Idx<T>) -> Result<&T, ListError> {
        let raw = slot.into_raw();
        self.slots
            .get(raw)
            .filter(|s| raw != SENTINEL && !s.is_free())
            .and_then(|s| s.value.as_ref())
            .ok_or(ListError::InvalidSlot { slot: raw })
    }

    /// Returns the value in `slot` mutably.
    ///
    /// # Errors
    ///
    /// Same as [`get`](ArenaList::get).
    pub fn get_mut(&mut self, slot: Idx<T>) -> Result<&mut T, ListError> {
        let raw = slot.into_raw();
        self.slots
            .get_mut(raw)
            .filter(|s| raw != SENTINEL && !s.is_free())
            .and_then(|s| s.value.as_mut())
            .ok_or(ListError::InvalidSlot { slot: raw })
    }

    /// Translates a 1-based logical position into a physical slot.
    ///
    /// O(1) when the list is linearized, otherwise walks `index - 1` links
    /// from the head.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfRange`] unless `1 <= index <= len()`.
    pub fn logical_to_physical(&self, index: usize) -> Result<Idx<T>, ListError> {
        if index == 0 || index > self.size {
            return Err(ListError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        if self.linearized {
            return Ok(Idx::from_raw(self.head + index - 1));
        }
        let mut cur = self.head;
        for _ in 1..index {
            cur = self.slots[cur].next;
        }
        Ok(Idx::from_raw(cur))
    }

    /// Returns the slot after `slot` in logical order, `None` at the tail.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidSlot`] if `slot` is not live.
    pub fn next_of(&self, slot: Idx<T>) -> Result<Option<Idx<T>>, ListError> {
        self.get(slot)?;
        Ok(non_sentinel(self.slots[slot.into_raw()].next))
    }

    /// Returns the slot before `slot` in logical order, `None` at the head.
    ///
    /// # Errors
    ///
    /// [`ListError::InvalidSlot`] if `slot` is not live.
    pub fn prev_of(&self, slot: Idx<T>) -> Result<Option<Idx<T>>, ListError> {
        self.get(slot)?;
        Ok(non_sentinel(self.slots[slot.into_raw()].prev))
    }

    /// Returns the number of live elements.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Alias of [`size`](ArenaList::size).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the list holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of allocatable slots, sentinel excluded.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of slots in the free chain.
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.free_count
    }

    /// Returns `true` if the live elements occupy consecutive slots in
    /// logical order, starting at the head.
    #[must_use]
    pub const fn is_linearized(&self) -> bool {
        self.linearized
    }

    /// Returns the configuration the list was built with.
    #[must_use]
    pub const fn config(&self) -> &ListConfig {
        &self.config
    }

    /// Returns the head slot, `None` when empty.
    #[must_use]
    pub const fn head(&self) -> Option<Idx<T>> {
        non_sentinel(self.head)
    }

    /// Returns the tail slot, `None` when empty.
    #[must_use]
    pub const fn tail(&self) -> Option<Idx<T>> {
        non_sentinel(self.tail)
    }

    /// Returns the first element.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.slots[self.head].value.as_ref()
    }

    /// Returns the last element.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.slots[self.tail].value.as_ref()
    }

    /// Iterates `(slot, value)` pairs in logical order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.slots, self.head, self.tail, self.size)
    }

    /// Iterates values in logical order.
    #[must_use]
    pub fn values(&self) -> Values<'_, T> {
        Values::new(self.iter())
    }

    /// Returns a read-only view of every field, for diagnostics.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_, T> {
        Snapshot {
            capacity: self.capacity,
            size: self.size,
            free_count: self.free_count,
            head: self.head,
            tail: self.tail,
            free_head: self.free_head,
            linearized: self.linearized,
            slots: &self.slots,
        }
    }

    /// Runs the invariant checker now, regardless of
    /// [`ListConfig::verify`].
    #[must_use]
    pub fn violations(&self) -> Violations {
        verify::check(&self.snapshot())
    }

    /// Precondition check of a mutating operation.
    pub(crate) fn enter(&self) -> Result<(), ListError> {
        if !self.config.verify {
            return Ok(());
        }
        let violations = self.violations();
        if violations.is_empty() {
            return Ok(());
        }
        tracing::warn!(%violations, "arena corrupt before operation");
        Err(ListError::StructuralCorruption {
            stage: CheckStage::Entry,
            violations,
        })
    }

    /// Postcondition check of a mutating operation.
    pub(crate) fn leave(&self) -> Result<(), ListError> {
        if !self.config.verify {
            return Ok(());
        }
        let violations = self.violations();
        if violations.is_empty() {
            return Ok(());
        }
        tracing::error!(
            %violations,
            capacity = self.capacity,
            size = self.size,
            "arena corrupted by operation"
        );
        Err(ListError::StructuralCorruption {
            stage: CheckStage::Exit,
            violations,
        })
    }
}

const fn non_sentinel<T>(raw: usize) -> Option<Idx<T>> {
    if raw == SENTINEL {
        None
    } else {
        Some(Idx::from_raw(raw))
    }
}

impl<T> Default for ArenaList<T> {
    fn default() -> Self {
        Self::from_parts(Vec::new(), ListConfig::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ArenaList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.values()).finish()
    }
}

impl<'a, T> IntoIterator for &'a ArenaList<T> {
    type Item = (Idx<T>, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
