//! List construction parameters.

/// Configuration for an [`ArenaList`](crate::ArenaList).
///
/// Copied into the list at construction and immutable afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Number of allocatable slots, not counting the sentinel.
    ///
    /// Must be at least 1.
    pub capacity: usize,

    /// Run the invariant checker on entry and exit of every mutating
    /// operation.
    ///
    /// Default: on in debug builds, off in release builds. The check is
    /// O(capacity) per call.
    pub verify: bool,

    /// Grow when the list is one slot short of full and shrink sparse
    /// linearized lists.
    ///
    /// With this off a full list rejects inserts with
    /// [`ListError::OutOfSlots`](crate::ListError::OutOfSlots).
    pub auto_resize: bool,
}

impl ListConfig {
    /// Default capacity.
    pub const DEFAULT_CAPACITY: usize = 8;

    /// Default checker setting.
    pub const DEFAULT_VERIFY: bool = cfg!(debug_assertions);

    /// Default resize setting.
    pub const DEFAULT_AUTO_RESIZE: bool = true;

    /// Creates a config with the given capacity and default settings.
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            verify: Self::DEFAULT_VERIFY,
            auto_resize: Self::DEFAULT_AUTO_RESIZE,
        }
    }

    /// Sets [`verify`](ListConfig::verify).
    #[must_use]
    pub const fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Sets [`auto_resize`](ListConfig::auto_resize).
    #[must_use]
    pub const fn with_auto_resize(mut self, auto_resize: bool) -> Self {
        self.auto_resize = auto_resize;
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity() {
        let config = ListConfig::default();
        assert_eq!(config.capacity, ListConfig::DEFAULT_CAPACITY);
        assert!(config.auto_resize);
    }

    #[test]
    fn builders_override() {
        let config = ListConfig::new(3)
            .with_verify(true)
            .with_auto_resize(false);
        assert_eq!(config.capacity, 3);
        assert!(config.verify);
        assert!(!config.auto_resize);
    }
}
