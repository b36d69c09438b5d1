//! Test fixtures and overlay helpers.

use crate::generators::OverlayOp;
use stagekv_core::Overlay;
use tracing_subscriber::EnvFilter;

/// Installs a `tracing` subscriber for tests.
///
/// The filter comes from `RUST_LOG` and defaults to `warn`. Calling this
/// more than once is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// Creates an overlay with the given committed entries and no pending
/// changes.
pub fn overlay_with_committed(pairs: &[(&str, &str)]) -> Overlay<String, String> {
    Overlay::from_committed(
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string())),
    )
}

fn set(key: &str, value: u32) -> OverlayOp {
    OverlayOp::Set {
        key: key.to_string(),
        value,
    }
}

fn delete(key: &str) -> OverlayOp {
    OverlayOp::Delete {
        key: key.to_string(),
    }
}

fn get(key: &str) -> OverlayOp {
    OverlayOp::Get {
        key: key.to_string(),
    }
}

/// The documented usage scenarios as operation sequences.
///
/// Every `Get` and `Size` is checked against the reference model when run
/// through [`check_sequence`](crate::check_sequence).
pub fn documented_scenarios() -> Vec<(&'static str, Vec<OverlayOp>)> {
    vec![
        (
            "set_commit_get",
            vec![set("key1", 1), OverlayOp::Size, OverlayOp::Commit, OverlayOp::Size, get("key1")],
        ),
        (
            "overwrite_after_commit",
            vec![set("key1", 1), OverlayOp::Commit, set("key1", 10), get("key1"), OverlayOp::Commit, get("key1")],
        ),
        (
            "set_then_delete",
            vec![set("key1", 1), delete("key1"), OverlayOp::Size, get("key1")],
        ),
        (
            "reset_undoes_delete",
            vec![set("key1", 1), OverlayOp::Commit, delete("key1"), OverlayOp::Reset, OverlayOp::Size, get("key1")],
        ),
        (
            "cancelled_write_never_commits",
            vec![set("key1", 1), delete("key1"), OverlayOp::Commit, get("key1")],
        ),
        (
            "set_after_delete",
            vec![set("key1", 1), delete("key1"), get("key1"), set("key1", 2), get("key1"), OverlayOp::Size],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::check_sequence;

    #[test]
    fn overlay_with_committed_has_no_pending_changes() {
        let overlay = overlay_with_committed(&[("a", "1"), ("b", "2")]);
        assert_eq!(overlay.size(), 2);
        assert_eq!(overlay.committed_len(), 2);
        assert!(!overlay.has_pending_changes());
        assert_eq!(overlay.get("a").map(String::as_str), Ok("1"));
    }

    #[test]
    fn documented_scenarios_match_model() {
        init_tracing();
        for (name, ops) in documented_scenarios() {
            if let Err(e) = check_sequence(&ops) {
                panic!("scenario {name} failed: {e}");
            }
        }
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
