//! Staged changes that have not been committed yet.

/// A borrowed view of one pending change.
#[derive(Debug, PartialEq, Eq)]
pub enum PendingChange<'a, V> {
    /// The key will be inserted or overwritten on commit.
    Put {
        /// Value to be committed.
        value: &'a V,
    },
    /// The key will be removed from the committed state on commit.
    Delete,
}

impl<V> Clone for PendingChange<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for PendingChange<'_, V> {}

impl<'a, V> PendingChange<'a, V> {
    /// Returns `true` for a pending delete.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self, Self::Delete)
    }

    /// Returns the staged value of a pending put.
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        match self {
            Self::Put { value } => Some(value),
            Self::Delete => None,
        }
    }
}
