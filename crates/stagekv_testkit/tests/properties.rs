//! Property tests for overlay visibility, commit and reset semantics.

use proptest::prelude::*;
use stagekv_core::OverlayError;
use stagekv_testkit::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    #[test]
    fn overlay_matches_model(ops in op_sequence_strategy(1, 64)) {
        if let Err(e) = check_sequence(&ops) {
            return Err(TestCaseError::fail(e));
        }
    }

    #[test]
    fn pending_write_has_priority(
        prefix in op_sequence_strategy(0, 32),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &prefix);

        overlay.set(key.clone(), value);
        prop_assert_eq!(overlay.get(key.as_str()), Ok(&value));

        overlay.commit();
        prop_assert_eq!(overlay.get(key.as_str()), Ok(&value));
    }

    #[test]
    fn delete_hides_key(
        prefix in op_sequence_strategy(0, 32),
        key in key_strategy(),
    ) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &prefix);

        overlay.delete(key.clone());
        prop_assert_eq!(overlay.get(key.as_str()), Err(OverlayError::NotFound));
        prop_assert!(!overlay.contains_key(key.as_str()));

        overlay.commit();
        prop_assert_eq!(overlay.get(key.as_str()), Err(OverlayError::NotFound));
    }

    #[test]
    fn commit_is_idempotent(prefix in op_sequence_strategy(0, 32)) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &prefix);
        overlay.commit();

        let size = overlay.size();
        let visible = visible_snapshot(&overlay);

        overlay.commit();
        prop_assert_eq!(overlay.size(), size);
        prop_assert_eq!(visible_snapshot(&overlay), visible);
        prop_assert!(!overlay.has_pending_changes());
    }

    #[test]
    fn reset_restores_last_commit(
        prefix in op_sequence_strategy(0, 32),
        staged in op_sequence_strategy(0, 32),
    ) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &prefix);
        overlay.commit();
        let baseline = visible_snapshot(&overlay);

        let staged: Vec<_> = staged.into_iter().filter(|op| !op.is_commit()).collect();
        run_ops(&mut overlay, &staged);
        overlay.reset();

        prop_assert_eq!(visible_snapshot(&overlay), baseline.clone());
        prop_assert_eq!(overlay.size(), baseline.len());
    }

    #[test]
    fn reset_without_commit_is_empty(ops in op_sequence_strategy(0, 32)) {
        let ops: Vec<_> = ops.into_iter().filter(|op| !op.is_commit()).collect();
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &ops);
        overlay.reset();

        prop_assert_eq!(overlay.size(), 0);
        prop_assert!(overlay.is_empty());
    }

    #[test]
    fn size_counts_resolvable_keys(ops in op_sequence_strategy(0, 64)) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &ops);

        let resolvable = all_keys().filter(|key| overlay.get(key.as_str()).is_ok()).count();
        prop_assert_eq!(overlay.size(), resolvable);
        prop_assert_eq!(overlay.iter().count(), resolvable);
    }

    #[test]
    fn pending_sets_stay_disjoint(ops in op_sequence_strategy(0, 64)) {
        let mut overlay = TestOverlay::new();
        run_ops(&mut overlay, &ops);

        let changes: Vec<_> = overlay.pending_changes().map(|(key, _)| key.clone()).collect();
        let mut unique = changes.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(changes.len(), unique.len());
        prop_assert_eq!(
            changes.len(),
            overlay.pending_write_count() + overlay.pending_delete_count()
        );
    }

    #[test]
    fn fuzz_harness_accepts_any_bytes(data in prop::collection::vec(any::<u8>(), 0..512)) {
        fuzz_overlay_operations(&data);
    }
}

#[test]
fn documented_scenarios_hold() {
    init_tracing();
    for (name, ops) in documented_scenarios() {
        assert!(check_sequence(&ops).is_ok(), "scenario {name} diverged");
    }
}
