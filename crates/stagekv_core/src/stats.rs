//! Overlay operation counters.
//!
//! # Usage
//!
//! ```rust
//! use stagekv_core::Overlay;
//!
//! let mut overlay = Overlay::new();
//! overlay.set("a", 1);
//! overlay.commit();
//! assert!(overlay.get("missing").is_err());
//!
//! let stats = overlay.stats().snapshot();
//! assert_eq!(stats.writes, 1);
//! assert_eq!(stats.commits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for overlay operations.
///
/// Counters are atomic so that lookups through `&Overlay` can be counted.
/// All values are monotonically increasing.
#[derive(Debug, Default)]
pub struct OverlayStats {
    /// Total number of `get` calls.
    reads: AtomicU64,
    /// Number of `get` calls that returned `NotFound`.
    misses: AtomicU64,
    /// Total number of `set` calls.
    writes: AtomicU64,
    /// Total number of `delete` calls.
    deletes: AtomicU64,
    /// Total number of commits.
    commits: AtomicU64,
    /// Total number of resets.
    resets: AtomicU64,
}

impl OverlayStats {
    /// Creates a new stats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_read(&self, hit: bool) {
        self.reads.fetch_add(1, Ordering::Relaxed);
        if !hit {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_commit(&self) {
        self.commits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_reset(&self) {
        self.resets.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the total number of `get` calls.
    pub fn reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Returns the number of `get` calls that found no visible value.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Returns the total number of `set` calls.
    pub fn writes(&self) -> u64 {
        self.writes.load(Ordering::Relaxed)
    }

    /// Returns the total number of `delete` calls.
    pub fn deletes(&self) -> u64 {
        self.deletes.load(Ordering::Relaxed)
    }

    /// Returns the total number of commits.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    /// Returns the total number of resets.
    pub fn resets(&self) -> u64 {
        self.resets.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of all counters.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            reads: self.reads(),
            misses: self.misses(),
            writes: self.writes(),
            deletes: self.deletes(),
            commits: self.commits(),
            resets: self.resets(),
        }
    }
}

/// A point-in-time copy of [`OverlayStats`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    /// Total number of `get` calls.
    pub reads: u64,
    /// Number of `get` calls that returned `NotFound`.
    pub misses: u64,
    /// Total number of `set` calls.
    pub writes: u64,
    /// Total number of `delete` calls.
    pub deletes: u64,
    /// Total number of commits.
    pub commits: u64,
    /// Total number of resets.
    pub resets: u64,
}

impl StatsSnapshot {
    /// Returns the fraction of reads that found a value, or `None` before
    /// the first read.
    #[must_use]
    pub fn hit_ratio(&self) -> Option<f64> {
        if self.reads == 0 {
            None
        } else {
            Some((self.reads - self.misses) as f64 / self.reads as f64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stats_are_zero() {
        let stats = OverlayStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn record_read_counts_misses() {
        let stats = OverlayStats::new();
        stats.record_read(true);
        stats.record_read(false);
        stats.record_read(true);

        assert_eq!(stats.reads(), 3);
        assert_eq!(stats.misses(), 1);
    }

    #[test]
    fn snapshot_captures_all_counters() {
        let stats = OverlayStats::new();
        stats.record_write();
        stats.record_write();
        stats.record_delete();
        stats.record_commit();
        stats.record_reset();

        let snap = stats.snapshot();
        assert_eq!(snap.writes, 2);
        assert_eq!(snap.deletes, 1);
        assert_eq!(snap.commits, 1);
        assert_eq!(snap.resets, 1);
        assert_eq!(snap.reads, 0);
    }

    #[test]
    fn hit_ratio() {
        let mut snap = StatsSnapshot::default();
        assert_eq!(snap.hit_ratio(), None);

        snap.reads = 4;
        snap.misses = 1;
        assert_eq!(snap.hit_ratio(), Some(0.75));
    }
}
