//! Overlay configuration.

/// Configuration for constructing an [`Overlay`](crate::Overlay).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Capacity hint for every fresh pending-writes map and
    /// pending-deletes set (at construction, commit and reset).
    pub pending_capacity: usize,

    /// Capacity hint for the committed map at construction.
    pub committed_capacity: usize,

    /// Whether operation counters are updated.
    pub record_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pending_capacity: 0,
            committed_capacity: 0,
            record_stats: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the capacity hint for pending containers.
    #[must_use]
    pub const fn pending_capacity(mut self, capacity: usize) -> Self {
        self.pending_capacity = capacity;
        self
    }

    /// Sets the capacity hint for the committed map.
    #[must_use]
    pub const fn committed_capacity(mut self, capacity: usize) -> Self {
        self.committed_capacity = capacity;
        self
    }

    /// Sets whether operation counters are updated.
    #[must_use]
    pub const fn record_stats(mut self, value: bool) -> Self {
        self.record_stats = value;
        self
    }
}
