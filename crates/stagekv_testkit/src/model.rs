//! Reference model for differential testing.
//!
//! [`ModelOverlay`] tracks only two maps: what is visible right now and what
//! was visible at the last commit. Running the same operations against an
//! [`Overlay`] and the model must always agree.

use crate::generators::OverlayOp;
use stagekv_core::{Overlay, OverlayError};
use std::collections::BTreeMap;

/// The overlay type exercised by the testkit.
pub type TestOverlay = Overlay<String, u32>;

/// A reference implementation of overlay semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOverlay<K, V> {
    visible: BTreeMap<K, V>,
    baseline: BTreeMap<K, V>,
}

impl<K, V> Default for ModelOverlay<K, V> {
    fn default() -> Self {
        Self {
            visible: BTreeMap::new(),
            baseline: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone, V: Clone> ModelOverlay<K, V> {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the visible value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.visible.get(key)
    }

    /// Makes `key -> value` visible.
    pub fn set(&mut self, key: K, value: V) {
        self.visible.insert(key, value);
    }

    /// Hides `key`.
    pub fn delete(&mut self, key: &K) {
        self.visible.remove(key);
    }

    /// Makes the visible state the new baseline.
    pub fn commit(&mut self) {
        self.baseline = self.visible.clone();
    }

    /// Restores the baseline.
    pub fn reset(&mut self) {
        self.visible = self.baseline.clone();
    }

    /// Returns the number of visible keys.
    #[must_use]
    pub fn size(&self) -> usize {
        self.visible.len()
    }

    /// Returns the visible state.
    #[must_use]
    pub fn visible(&self) -> &BTreeMap<K, V> {
        &self.visible
    }

    /// Returns the state as of the last commit.
    #[must_use]
    pub fn baseline(&self) -> &BTreeMap<K, V> {
        &self.baseline
    }
}

/// Collects the visible entries of `overlay` into an ordered map.
pub fn visible_snapshot(overlay: &TestOverlay) -> BTreeMap<String, u32> {
    overlay
        .iter()
        .map(|(key, value)| (key.clone(), *value))
        .collect()
}

/// Applies `ops` to `overlay` without checking anything.
pub fn run_ops(overlay: &mut TestOverlay, ops: &[OverlayOp]) {
    for op in ops {
        match op {
            OverlayOp::Set { key, value } => overlay.set(key.clone(), *value),
            OverlayOp::Delete { key } => overlay.delete(key.clone()),
            OverlayOp::Get { key } => {
                let _ = overlay.get(key.as_str());
            }
            OverlayOp::Commit => overlay.commit(),
            OverlayOp::Reset => overlay.reset(),
            OverlayOp::Size => {
                let _ = overlay.size();
            }
        }
    }
}

/// Applies one operation to both the overlay and the model, then checks
/// that they still agree.
///
/// # Errors
///
/// Returns a description of the first divergence found.
pub fn apply_op(
    overlay: &mut TestOverlay,
    model: &mut ModelOverlay<String, u32>,
    op: &OverlayOp,
) -> Result<(), String> {
    match op {
        OverlayOp::Set { key, value } => {
            overlay.set(key.clone(), *value);
            model.set(key.clone(), *value);
            if overlay.get(key.as_str()) != Ok(value) {
                return Err(format!("set {key} = {value} is not visible"));
            }
        }
        OverlayOp::Delete { key } => {
            overlay.delete(key.clone());
            model.delete(key);
            if overlay.get(key.as_str()) != Err(OverlayError::NotFound) {
                return Err(format!("deleted key {key} is still visible"));
            }
        }
        OverlayOp::Get { key } => {
            let actual = overlay.get(key.as_str()).ok();
            let expected = model.get(key);
            if actual != expected {
                return Err(format!(
                    "get {key}: overlay returned {actual:?}, model expected {expected:?}"
                ));
            }
        }
        OverlayOp::Commit => {
            overlay.commit();
            model.commit();
            if overlay.has_pending_changes() {
                return Err("pending changes survived commit".to_string());
            }
        }
        OverlayOp::Reset => {
            overlay.reset();
            model.reset();
            if overlay.has_pending_changes() {
                return Err("pending changes survived reset".to_string());
            }
        }
        OverlayOp::Size => {
            if overlay.size() != model.size() {
                return Err(format!(
                    "size: overlay returned {}, model expected {}",
                    overlay.size(),
                    model.size()
                ));
            }
        }
    }
    check_consistent(overlay, model)
}

/// Checks that the full visible state of `overlay` matches `model`.
///
/// # Errors
///
/// Returns a description of the mismatch.
pub fn check_consistent(
    overlay: &TestOverlay,
    model: &ModelOverlay<String, u32>,
) -> Result<(), String> {
    let snapshot = visible_snapshot(overlay);
    if &snapshot != model.visible() {
        return Err(format!(
            "visible state diverged: overlay {snapshot:?}, model {:?}",
            model.visible()
        ));
    }
    if overlay.size() != snapshot.len() {
        return Err(format!(
            "size {} does not match {} visible entries",
            overlay.size(),
            snapshot.len()
        ));
    }
    Ok(())
}

/// Runs `ops` against a fresh overlay and a fresh model.
///
/// # Errors
///
/// Returns the index and description of the first divergence.
pub fn check_sequence(ops: &[OverlayOp]) -> Result<(), String> {
    let mut overlay = TestOverlay::new();
    let mut model = ModelOverlay::new();

    for (i, op) in ops.iter().enumerate() {
        apply_op(&mut overlay, &mut model, op).map_err(|e| format!("op {i} ({op:?}): {e}"))?;
    }
    Ok(())
}
