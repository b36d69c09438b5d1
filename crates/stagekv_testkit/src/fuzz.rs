//! Fuzz testing harnesses for the overlay.
//!
//! These targets can be driven by cargo-fuzz or any byte source.

use crate::generators::{test_key, OverlayOp};
use crate::model::check_sequence;

/// Decodes an arbitrary byte string into overlay operations.
///
/// Each operation starts with a tag byte. `Set` consumes a key byte and a
/// value byte, `Delete` and `Get` consume a key byte. A truncated trailing
/// operation is dropped.
pub fn decode_ops(data: &[u8]) -> Vec<OverlayOp> {
    let mut ops = Vec::new();
    let mut bytes = data.iter().copied();

    while let Some(tag) = bytes.next() {
        let op = match tag % 6 {
            0 => {
                let (Some(key), Some(value)) = (bytes.next(), bytes.next()) else {
                    break;
                };
                OverlayOp::Set {
                    key: test_key(key),
                    value: u32::from(value),
                }
            }
            1 => {
                let Some(key) = bytes.next() else { break };
                OverlayOp::Delete { key: test_key(key) }
            }
            2 => {
                let Some(key) = bytes.next() else { break };
                OverlayOp::Get { key: test_key(key) }
            }
            3 => OverlayOp::Commit,
            4 => OverlayOp::Reset,
            _ => OverlayOp::Size,
        };
        ops.push(op);
    }

    ops
}

/// Fuzz target for overlay operations.
///
/// Any byte string decodes to a valid operation sequence; the overlay must
/// agree with the reference model on every step.
pub fn fuzz_overlay_operations(data: &[u8]) {
    let ops = decode_ops(data);
    if let Err(e) = check_sequence(&ops) {
        panic!("overlay diverged from model: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::{DefaultHasher, Hash, Hasher};

    /// Generate pseudo-random data for fuzzing based on a seed.
    fn generate_random_data(seed: u64, len: usize) -> Vec<u8> {
        let mut result = Vec::with_capacity(len);
        let mut state = seed;

        for _ in 0..len {
            let mut hasher = DefaultHasher::new();
            state.hash(&mut hasher);
            state = hasher.finish();
            result.push((state & 0xFF) as u8);
        }

        result
    }

    #[test]
    fn decode_empty() {
        assert!(decode_ops(&[]).is_empty());
    }

    #[test]
    fn decode_drops_truncated_set() {
        // Set with a key but no value
        assert!(decode_ops(&[0, 1]).is_empty());
    }

    #[test]
    fn decode_all_tags() {
        let ops = decode_ops(&[0, 1, 7, 1, 1, 2, 1, 3, 4, 5]);
        assert_eq!(
            ops,
            vec![
                OverlayOp::Set {
                    key: "key1".to_string(),
                    value: 7,
                },
                OverlayOp::Delete {
                    key: "key1".to_string(),
                },
                OverlayOp::Get {
                    key: "key1".to_string(),
                },
                OverlayOp::Commit,
                OverlayOp::Reset,
                OverlayOp::Size,
            ]
        );
    }

    #[test]
    fn fuzz_empty_input() {
        fuzz_overlay_operations(&[]);
    }

    #[test]
    fn fuzz_garbage_input() {
        fuzz_overlay_operations(&[0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn fuzz_random_inputs() {
        for seed in 0..64 {
            let data = generate_random_data(seed, 256);
            fuzz_overlay_operations(&data);
        }
    }
}
