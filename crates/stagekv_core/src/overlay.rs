//! The staged key-value overlay.

use crate::config::Config;
use crate::error::{OverlayError, OverlayResult};
use crate::pending::PendingChange;
use crate::stats::OverlayStats;
use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use tracing::{debug, trace};

/// A key-value map that separates pending changes from committed state.
///
/// Writes and deletes are staged until [`commit`](Self::commit) folds them
/// into the committed baseline, or [`reset`](Self::reset) discards them.
///
/// Lookups resolve in a fixed order:
/// 1. a pending write for the key wins;
/// 2. otherwise a pending delete hides the key;
/// 3. otherwise the committed value, if any, is returned.
///
/// # Invariants
///
/// - A key is never both a pending write and a pending delete.
/// - Pending writes and pending deletes are only cleared together, by
///   `commit` or `reset`.
/// - The committed map is only mutated by `commit`.
///
/// # Example
///
/// ```rust
/// use stagekv_core::Overlay;
///
/// let mut overlay = Overlay::new();
/// overlay.set("key1", "value1");
/// overlay.commit();
///
/// overlay.delete("key1");
/// assert!(overlay.get("key1").is_err());
///
/// overlay.reset();
/// assert_eq!(overlay.get("key1"), Ok(&"value1"));
/// ```
#[derive(Debug)]
pub struct Overlay<K, V> {
    /// Durable baseline as of the last commit.
    committed: HashMap<K, V>,
    /// Values set since the last commit or reset.
    pending_writes: HashMap<K, V>,
    /// Keys to remove from the baseline on the next commit.
    pending_deletes: HashSet<K>,
    config: Config,
    stats: OverlayStats,
}

impl<K, V> Overlay<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty overlay with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty overlay with the given configuration.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            committed: HashMap::with_capacity(config.committed_capacity),
            pending_writes: HashMap::with_capacity(config.pending_capacity),
            pending_deletes: HashSet::with_capacity(config.pending_capacity),
            config,
            stats: OverlayStats::new(),
        }
    }

    /// Creates an overlay whose committed baseline holds `entries` and
    /// which has no pending changes.
    pub fn from_committed<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut overlay = Self::new();
        overlay.committed.extend(entries);
        overlay
    }

    /// Returns the visible value for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::NotFound`] if the key has no pending write
    /// and is either pending deletion or absent from the committed state.
    pub fn get<Q>(&self, key: &Q) -> OverlayResult<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let found = self.resolve(key);
        if self.config.record_stats {
            self.stats.record_read(found.is_some());
        }
        found.ok_or(OverlayError::NotFound)
    }

    /// Returns `true` if [`get`](Self::get) would succeed for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.resolve(key).is_some()
    }

    fn resolve<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(value) = self.pending_writes.get(key) {
            return Some(value);
        }
        if self.pending_deletes.contains(key) {
            return None;
        }
        self.committed.get(key)
    }

    /// Stages `key -> value`, overwriting any earlier pending write and
    /// cancelling a pending delete of the same key.
    pub fn set(&mut self, key: K, value: V) {
        let undeleted = self.pending_deletes.remove(&key);
        self.pending_writes.insert(key, value);
        trace!(undeleted, "staged write");
        if self.config.record_stats {
            self.stats.record_write();
        }
    }

    /// Marks `key` for removal on the next commit and discards any pending
    /// write for it.
    ///
    /// Deleting a key that is not present anywhere is not an error.
    pub fn delete(&mut self, key: K) {
        let discarded = self.pending_writes.remove(&key).is_some();
        self.pending_deletes.insert(key);
        trace!(discarded, "staged delete");
        if self.config.record_stats {
            self.stats.record_delete();
        }
    }

    /// Applies all pending writes and deletes to the committed state and
    /// starts a fresh, empty set of pending changes.
    ///
    /// Committing with nothing pending leaves the overlay unchanged.
    pub fn commit(&mut self) {
        let (writes, deletes) = self.take_pending();
        let applied_writes = writes.len();
        let applied_deletes = deletes.len();

        self.committed.extend(writes);
        for key in &deletes {
            self.committed.remove(key);
        }

        debug!(
            applied_writes,
            applied_deletes,
            committed = self.committed.len(),
            "committed pending changes"
        );
        if self.config.record_stats {
            self.stats.record_commit();
        }
    }

    /// Discards all pending writes and deletes. The committed state is
    /// left exactly as it was after the last commit.
    pub fn reset(&mut self) {
        let (writes, deletes) = self.take_pending();
        debug!(
            discarded_writes = writes.len(),
            discarded_deletes = deletes.len(),
            "reset pending changes"
        );
        if self.config.record_stats {
            self.stats.record_reset();
        }
    }

    /// Swaps in fresh pending containers and returns the old ones.
    fn take_pending(&mut self) -> (HashMap<K, V>, HashSet<K>) {
        let capacity = self.config.pending_capacity;
        let writes = std::mem::replace(&mut self.pending_writes, HashMap::with_capacity(capacity));
        let deletes = std::mem::replace(&mut self.pending_deletes, HashSet::with_capacity(capacity));
        (writes, deletes)
    }

    /// Returns the number of visible keys.
    ///
    /// This is the union of committed and pending-write keys, minus the
    /// pending deletes.
    #[must_use]
    pub fn size(&self) -> usize {
        let union: HashSet<&K> = self
            .committed
            .keys()
            .chain(self.pending_writes.keys())
            .collect();
        union
            .into_iter()
            .filter(|key| !self.pending_deletes.contains(*key))
            .count()
    }

    /// Returns `true` if no key is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Iterates over every visible `(key, value)` pair, each key once.
    ///
    /// Pending writes come first, followed by the committed entries they
    /// do not shadow and that are not pending deletion.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let committed = self.committed.iter().filter(move |&(key, _)| {
            !self.pending_writes.contains_key(key) && !self.pending_deletes.contains(key)
        });
        self.pending_writes.iter().chain(committed)
    }

    /// Iterates over every visible key.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns `true` if there are staged writes or deletes.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending_writes.is_empty() || !self.pending_deletes.is_empty()
    }

    /// Returns the number of pending writes.
    #[must_use]
    pub fn pending_write_count(&self) -> usize {
        self.pending_writes.len()
    }

    /// Returns the number of pending deletes.
    #[must_use]
    pub fn pending_delete_count(&self) -> usize {
        self.pending_deletes.len()
    }

    /// Returns the pending change staged for `key`, if any.
    pub fn pending_change<Q>(&self, key: &Q) -> Option<PendingChange<'_, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(value) = self.pending_writes.get(key) {
            Some(PendingChange::Put { value })
        } else if self.pending_deletes.contains(key) {
            Some(PendingChange::Delete)
        } else {
            None
        }
    }

    /// Iterates over all pending changes. Each key appears at most once.
    pub fn pending_changes(&self) -> impl Iterator<Item = (&K, PendingChange<'_, V>)> + '_ {
        let puts = self
            .pending_writes
            .iter()
            .map(|(key, value)| (key, PendingChange::Put { value }));
        let deletes = self
            .pending_deletes
            .iter()
            .map(|key| (key, PendingChange::Delete));
        puts.chain(deletes)
    }

    /// Returns the committed value for `key`, ignoring pending changes.
    pub fn get_committed<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.committed.get(key)
    }

    /// Returns the number of committed entries, ignoring pending changes.
    #[must_use]
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }

    /// Consumes the overlay and returns its committed state. Pending
    /// changes are dropped.
    #[must_use]
    pub fn into_committed(self) -> HashMap<K, V> {
        self.committed
    }

    /// Returns the operation counters.
    #[must_use]
    pub fn stats(&self) -> &OverlayStats {
        &self.stats
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<K, V> Default for Overlay<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FromIterator<(K, V)> for Overlay<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_committed(iter)
    }
}

impl<K, V> Extend<(K, V)> for Overlay<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
