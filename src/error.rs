use std::error::Error;
use std::fmt;

use crate::Violations;

/// When the invariant checker ran relative to the failing operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckStage {
    /// Before any mutation. The list was already corrupt.
    Entry,
    /// After the mutation. The operation itself broke the list.
    Exit,
}

impl fmt::Display for CheckStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entry => write!(f, "entry"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Errors returned by [`ArenaList`](crate::ArenaList) operations.
///
/// Every variant except exit-stage [`StructuralCorruption`] leaves the
/// list exactly as it was before the call.
///
/// [`StructuralCorruption`]: ListError::StructuralCorruption
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    /// Construction with a capacity of zero.
    InvalidCapacity,
    /// The backing vector could not be grown.
    OutOfMemory {
        /// Number of slots that were requested.
        requested: usize,
    },
    /// No free slot left and automatic growth is disabled.
    OutOfSlots {
        /// Capacity at the time of the failure.
        capacity: usize,
    },
    /// Insert/erase position out of range, free, or the sentinel where a
    /// live element is required.
    InvalidPosition {
        /// The rejected position.
        position: usize,
    },
    /// Accessor slot out of range, free, or the sentinel.
    InvalidSlot {
        /// The rejected slot.
        slot: usize,
    },
    /// Erase of a slot that is already in the free chain.
    DoubleFree {
        /// The slot that was already free.
        slot: usize,
    },
    /// Logical index outside `1..=size`.
    IndexOutOfRange {
        /// The rejected logical index.
        index: usize,
        /// Number of live elements.
        size: usize,
    },
    /// The invariant checker returned a non-empty set.
    StructuralCorruption {
        /// Whether the check ran before or after the mutation.
        stage: CheckStage,
        /// Violated invariants.
        violations: Violations,
    },
}

impl ListError {
    /// Returns `true` if the list must not be used after this error.
    ///
    /// Only corruption detected after a mutation is fatal; every other
    /// error is a rejected request.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::StructuralCorruption {
                stage: CheckStage::Exit,
                ..
            }
        )
    }
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity => write!(f, "capacity must be at least 1"),
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: could not reserve {requested} slots")
            }
            Self::OutOfSlots { capacity } => {
                write!(f, "no free slot left (capacity {capacity})")
            }
            Self::InvalidPosition { position } => {
                write!(f, "invalid position: {position}")
            }
            Self::InvalidSlot { slot } => write!(f, "invalid slot: {slot}"),
            Self::DoubleFree { slot } => write!(f, "slot {slot} is already free"),
            Self::IndexOutOfRange { index, size } => {
                write!(f, "logical index {index} out of range 1..={size}")
            }
            Self::StructuralCorruption { stage, violations } => {
                write!(f, "structural corruption on {stage}: {violations}")
            }
        }
    }
}

impl Error for ListError {}
