//! Self-verifying doubly linked list in a single arena.
//!
//! `arena-list` stores list elements in one contiguous slot vector instead
//! of allocating a node per element. Links are slot indices, unused slots
//! are threaded into an intrusive free chain, and slot 0 is a sentinel
//! whose neighbours are the head and tail.
//!
//! # Key properties
//!
//! - **O(1) splice**: insert after / erase at a known slot relinks two
//!   neighbours and pops or pushes the free chain
//! - **No per-element allocation**: the arena only reallocates when the
//!   resize policy grows or shrinks it
//! - **Dual addressing**: physical [`Idx<T>`] slots vs. 1-based logical
//!   positions, with O(1) translation once the list is
//!   [linearized](ArenaList::linearize)
//! - **Self-verifying**: [`check`] re-derives every structural invariant
//!   from a [`Snapshot`]; with [`ListConfig::verify`] on it runs before
//!   and after every mutation
//!
//! # Example
//!
//! ```
//! use arena_list::{ArenaList, Idx};
//!
//! let mut list: ArenaList<&str> = ArenaList::new(4).unwrap();
//! let b = list.insert_back("b").unwrap();
//! list.insert_front("a").unwrap();
//! list.insert_before(b, "c").unwrap();
//!
//! let values: Vec<_> = list.values().copied().collect();
//! assert_eq!(values, ["a", "b", "c"]);
//!
//! list.linearize().unwrap();
//! assert!(list.is_linearized());
//! assert_eq!(list.logical_to_physical(3).unwrap(), Idx::from_raw(3));
//! assert!(list.violations().is_empty());
//! ```

#![deny(missing_docs)]

mod config;
mod error;
mod free_list;
mod idx;
mod iter;
mod linearize;
mod list;
mod resize;
mod slot;
mod snapshot;
mod verify;

pub use config::ListConfig;
pub use error::{CheckStage, ListError};
pub use idx::Idx;
pub use iter::{Iter, Values};
pub use list::ArenaList;
pub use slot::{FREE_MARKER, Slot};
pub use snapshot::Snapshot;
pub use verify::{Violations, check};

#[cfg(test)]
mod tests;
