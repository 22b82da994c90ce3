//! Structural invariant checker.
//!
//! [`check`] re-derives the soundness of an arena from a [`Snapshot`]
//! without trusting any cached bookkeeping. It is O(capacity) and
//! allocates one bitmap of `capacity + 1` entries.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::{Snapshot, slot::SENTINEL};

/// Set of violated invariants, as a bitmask.
///
/// An empty set means the arena is sound.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Violations(u32);

impl Violations {
    /// Capacity is zero.
    pub const ZERO_CAPACITY: Self = Self(1 << 0);
    /// More live elements than slots.
    pub const CAPACITY_LOWER_SIZE: Self = Self(1 << 1);
    /// The slot vector does not have `capacity + 1` entries.
    pub const STORAGE_MISSING: Self = Self(1 << 2);
    /// Cached head/tail differ from the sentinel's neighbours.
    pub const HEAD_TAIL_MISMATCH: Self = Self(1 << 3);
    /// Free chain head points outside the arena.
    pub const FREE_PTR_OUT_OF_RANGE: Self = Self(1 << 4);
    /// `size + free_count != capacity`.
    pub const FREE_COUNT_MISMATCH: Self = Self(1 << 5);
    /// The live chain has the wrong length, loops, has broken back links,
    /// or touches a free or poisoned slot.
    pub const LIVE_CHAIN_CORRUPT: Self = Self(1 << 6);
    /// The free chain has the wrong length, loops, or touches a slot that
    /// is not free-marked or still holds a value.
    pub const FREE_CHAIN_CORRUPT: Self = Self(1 << 7);
    /// The sentinel holds a value or carries the free marker.
    pub const SENTINEL_CORRUPT: Self = Self(1 << 8);
    /// The linearized flag is set but physical order differs from logical
    /// order.
    pub const LINEARIZATION_MISMATCH: Self = Self(1 << 9);

    const NAMES: [(Self, &'static str); 10] = [
        (Self::ZERO_CAPACITY, "ZERO_CAPACITY"),
        (Self::CAPACITY_LOWER_SIZE, "CAPACITY_LOWER_SIZE"),
        (Self::STORAGE_MISSING, "STORAGE_MISSING"),
        (Self::HEAD_TAIL_MISMATCH, "HEAD_TAIL_MISMATCH"),
        (Self::FREE_PTR_OUT_OF_RANGE, "FREE_PTR_OUT_OF_RANGE"),
        (Self::FREE_COUNT_MISMATCH, "FREE_COUNT_MISMATCH"),
        (Self::LIVE_CHAIN_CORRUPT, "LIVE_CHAIN_CORRUPT"),
        (Self::FREE_CHAIN_CORRUPT, "FREE_CHAIN_CORRUPT"),
        (Self::SENTINEL_CORRUPT, "SENTINEL_CORRUPT"),
        (Self::LINEARIZATION_MISMATCH, "LINEARIZATION_MISMATCH"),
    ];

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Returns `true` if no invariant is violated.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if every flag in `other` is set in `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Iterates over the names of the set flags, lowest bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .filter(move |(flag, _)| self.contains(*flag))
            .map(|(_, name)| name)
    }
}

impl BitOr for Violations {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Violations {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "OK");
        }
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Violations({:#012b}: {self})", self.0)
    }
}

/// Checks every structural invariant of the arena described by `snap`.
///
/// Pure: reads the snapshot only. Each violation class is detected
/// independently, so several flags may be set at once. When the slot
/// vector has the wrong length the chains are not walked.
#[must_use]
pub fn check<T>(snap: &Snapshot<'_, T>) -> Violations {
    let mut found = Violations::empty();
    let cap = snap.capacity;
    let slots = snap.slots;

    if cap == 0 {
        found |= Violations::ZERO_CAPACITY;
    }
    if snap.size > cap {
        found |= Violations::CAPACITY_LOWER_SIZE;
    }
    if snap.size.checked_add(snap.free_count) != Some(cap) {
        found |= Violations::FREE_COUNT_MISMATCH;
    }
    if snap.free_head > cap {
        found |= Violations::FREE_PTR_OUT_OF_RANGE;
    }
    if slots.len() != cap.wrapping_add(1) || slots.is_empty() {
        found |= Violations::STORAGE_MISSING;
        return found;
    }

    let sentinel = &slots[SENTINEL];
    if sentinel.value.is_some() || sentinel.is_free() {
        found |= Violations::SENTINEL_CORRUPT;
    }
    if snap.head != sentinel.next || snap.tail != sentinel.prev {
        found |= Violations::HEAD_TAIL_MISMATCH;
    }

    let mut seen = vec![false; slots.len()];
    seen[SENTINEL] = true;

    let live = walk_live(snap, &mut seen);
    if live.corrupt {
        found |= Violations::LIVE_CHAIN_CORRUPT;
    } else if snap.linearized && !live.contiguous {
        found |= Violations::LINEARIZATION_MISMATCH;
    }

    if walk_free(snap, &mut seen) {
        found |= Violations::FREE_CHAIN_CORRUPT;
    }

    // Anything neither chain reached is orphaned.
    for (idx, slot) in slots.iter().enumerate().skip(1) {
        if !seen[idx] {
            if slot.is_free() {
                found |= Violations::FREE_CHAIN_CORRUPT;
            } else {
                found |= Violations::LIVE_CHAIN_CORRUPT;
            }
        }
    }

    found
}

struct LiveWalk {
    corrupt: bool,
    contiguous: bool,
}

/// Follows `next` from the sentinel `size` times.
///
/// Every step must land on an unvisited live slot whose `prev` is the slot
/// just left; the walk must then be back at the sentinel, whose `prev` must
/// be the last slot visited.
fn walk_live<T>(snap: &Snapshot<'_, T>, seen: &mut [bool]) -> LiveWalk {
    let slots = snap.slots;
    let first = slots[SENTINEL].next;
    let mut prev = SENTINEL;
    let mut cur = first;
    let mut contiguous = true;

    for offset in 0..snap.size {
        let Some(slot) = slots.get(cur) else {
            return LiveWalk {
                corrupt: true,
                contiguous: false,
            };
        };
        if cur == SENTINEL || seen[cur] || !slot.is_live() || slot.prev != prev {
            return LiveWalk {
                corrupt: true,
                contiguous: false,
            };
        }
        if first.checked_add(offset) != Some(cur) {
            contiguous = false;
        }
        seen[cur] = true;
        prev = cur;
        cur = slot.next;
    }

    LiveWalk {
        corrupt: cur != SENTINEL || slots[SENTINEL].prev != prev,
        contiguous,
    }
}

/// Follows `next` from the free head `free_count` times. Returns `true` on
/// corruption.
fn walk_free<T>(snap: &Snapshot<'_, T>, seen: &mut [bool]) -> bool {
    let slots = snap.slots;
    let mut cur = snap.free_head;

    for _ in 0..snap.free_count {
        let Some(slot) = slots.get(cur) else {
            return true;
        };
        if cur == SENTINEL || seen[cur] || !slot.is_free() || slot.value.is_some() {
            return true;
        }
        seen[cur] = true;
        cur = slot.next;
    }

    cur != SENTINEL
}
