use std::iter::FusedIterator;

use crate::{Idx, Slot};

/// Iterator yielding `(Idx<T>, &T)` pairs in logical order.
///
/// Created by [`ArenaList::iter`](crate::ArenaList::iter). Walks the
/// links from both ends and stops after `len()` elements.
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) const fn new(slots: &'a [Slot<T>], head: usize, tail: usize, len: usize) -> Self {
        Self {
            slots,
            front: head,
            back: tail,
            remaining: len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Idx<T>, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.front;
        let slot = self.slots.get(idx)?;
        self.front = slot.next;
        self.remaining -= 1;
        slot.value.as_ref().map(|v| (Idx::from_raw(idx), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.back;
        let slot = self.slots.get(idx)?;
        self.back = slot.prev;
        self.remaining -= 1;
        slot.value.as_ref().map(|v| (Idx::from_raw(idx), v))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

/// Iterator over values in logical order.
///
/// Created by [`ArenaList::values`](crate::ArenaList::values).
pub struct Values<'a, T> {
    inner: Iter<'a, T>,
}

impl<'a, T> Values<'a, T> {
    pub(crate) const fn new(inner: Iter<'a, T>) -> Self {
        Self { inner }
    }
}

impl<'a, T> Iterator for Values<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Values<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<T> ExactSizeIterator for Values<'_, T> {}

impl<T> FusedIterator for Values<'_, T> {}
