//! Benchmark utilities.

use rand::seq::SliceRandom;
use rand::Rng;
use stagekv_core::Overlay;

/// Generate `count` distinct keys.
pub fn generate_keys(count: usize) -> Vec<u64> {
    let mut rng = rand::thread_rng();
    let mut keys: Vec<u64> = (0..count as u64).collect();
    keys.shuffle(&mut rng);
    keys
}

/// Generate `count` key/value pairs with random values.
pub fn generate_entries(count: usize) -> Vec<(u64, u64)> {
    let mut rng = rand::thread_rng();
    generate_keys(count)
        .into_iter()
        .map(|key| (key, rng.gen()))
        .collect()
}

/// Build an overlay with `count` committed entries.
pub fn committed_overlay(count: usize) -> Overlay<u64, u64> {
    Overlay::from_committed(generate_entries(count))
}

/// Build an overlay with `count` committed entries, where half of them are
/// overwritten and a quarter deleted in the pending state.
pub fn overlapping_overlay(count: usize) -> Overlay<u64, u64> {
    let mut overlay = committed_overlay(count);
    let keys = generate_keys(count);
    for &key in keys.iter().take(count / 2) {
        overlay.set(key, key);
    }
    for &key in keys.iter().skip(count / 2).take(count / 4) {
        overlay.delete(key);
    }
    overlay
}
