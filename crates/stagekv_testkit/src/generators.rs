//! Property-based test generators using proptest.
//!
//! Keys are drawn from a deliberately small space so that generated
//! sequences keep hitting the same keys with sets, deletes, commits and
//! resets.

use proptest::prelude::*;

/// Number of distinct keys produced by [`key_strategy`].
pub const KEY_SPACE: u8 = 8;

/// Returns the name of the `n`th test key.
#[must_use]
pub fn test_key(n: u8) -> String {
    format!("key{}", n % KEY_SPACE)
}

/// Iterates over every key [`key_strategy`] can produce.
pub fn all_keys() -> impl Iterator<Item = String> {
    (0..KEY_SPACE).map(test_key)
}

/// Strategy for generating keys from the small test key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    (0..KEY_SPACE).prop_map(test_key)
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

/// An operation against an overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayOp {
    /// Stage a write
    Set {
        /// Key
        key: String,
        /// Value
        value: u32,
    },
    /// Stage a delete
    Delete {
        /// Key
        key: String,
    },
    /// Look a key up
    Get {
        /// Key
        key: String,
    },
    /// Commit pending changes
    Commit,
    /// Discard pending changes
    Reset,
    /// Query the visible key count
    Size,
}

impl OverlayOp {
    /// Returns `true` for operations that change committed state.
    #[must_use]
    pub fn is_commit(&self) -> bool {
        matches!(self, Self::Commit)
    }

    /// Returns `true` for operations that discard pending state.
    #[must_use]
    pub fn is_reset(&self) -> bool {
        matches!(self, Self::Reset)
    }
}

/// Strategy for generating a single overlay operation.
pub fn overlay_op_strategy() -> impl Strategy<Value = OverlayOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| OverlayOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| OverlayOp::Delete { key }),
        3 => key_strategy().prop_map(|key| OverlayOp::Get { key }),
        1 => Just(OverlayOp::Commit),
        1 => Just(OverlayOp::Reset),
        1 => Just(OverlayOp::Size),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<OverlayOp>> {
    prop::collection::vec(overlay_op_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
