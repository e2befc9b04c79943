//! Unit and property tests for the resistance index.

#[cfg(test)]
mod helpers {
    use rad_core::{StructureId, Tile, TilePos};

    pub fn at(s: u32, x: i32, y: i32) -> Option<TilePos> {
        Some(TilePos::new(StructureId(s), Tile::new(x, y)))
    }
}

#[cfg(test)]
mod handlers {
    use rad_core::StructureId;
    use rad_entity::RadiationBlocker;

    use super::helpers::at;
    use crate::ResistanceIndex;

    #[test]
    fn add_accumulates_per_tile() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(1.5);
        let mut b = RadiationBlocker::new(2.0);
        assert!(idx.add_blocker(&mut a, at(0, 1, 1)));
        assert!(idx.add_blocker(&mut b, at(0, 1, 1)));
        assert_eq!(idx.resistance_at(at(0, 1, 1).unwrap()), 3.5);
        assert_eq!(idx.resistance_at(at(0, 2, 1).unwrap()), 0.0);
        assert_eq!(a.counted_at, at(0, 1, 1));
    }

    #[test]
    fn off_structure_add_is_silent_noop() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(1.0);
        assert!(!idx.add_blocker(&mut a, None));
        assert!(a.counted_at.is_none());
        assert_eq!(idx.tile_count(), 0);
    }

    #[test]
    fn disabled_or_loose_blocker_contributes_nothing() {
        let mut idx = ResistanceIndex::new();
        let mut off = RadiationBlocker::new(1.0);
        off.enabled = false;
        let mut loose = RadiationBlocker::new(1.0);
        loose.anchored = false;
        assert!(!idx.add_blocker(&mut off, at(0, 0, 0)));
        assert!(!idx.add_blocker(&mut loose, at(0, 0, 0)));
        assert_eq!(idx.structure_count(), 0);
    }

    #[test]
    fn double_add_does_not_double_count() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(2.0);
        idx.add_blocker(&mut a, at(0, 0, 0));
        idx.add_blocker(&mut a, at(0, 0, 0));
        assert_eq!(idx.resistance_at(at(0, 0, 0).unwrap()), 2.0);
    }

    #[test]
    fn huge_blockers_sum_without_clamping() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(3_000_000.0);
        let mut b = RadiationBlocker::new(3_000_000.0);
        idx.add_blocker(&mut a, at(0, 1, 0));
        idx.add_blocker(&mut b, at(0, 1, 0));
        let tile = at(0, 1, 0).unwrap();
        assert_eq!(idx.resistance_at(tile), 6_000_000.0);
        assert_eq!(idx.resistance_milli(tile), u32::MAX);
        assert!(idx.matches([&a, &b]));

        idx.remove_blocker(&mut b);
        assert_eq!(idx.resistance_at(tile), 3_000_000.0);
        assert_eq!(idx.resistance_milli(tile), 3_000_000_000);
        assert!(idx.matches([&a, &b]));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(2.0);
        let mut never = RadiationBlocker::new(7.0);
        idx.add_blocker(&mut a, at(0, 0, 0));
        assert!(idx.remove_blocker(&mut a));
        assert!(!idx.remove_blocker(&mut a));
        assert!(!idx.remove_blocker(&mut never));
        assert_eq!(idx.resistance_at(at(0, 0, 0).unwrap()), 0.0);
        assert_eq!(idx.structure_count(), 0, "empty maps are pruned");
    }

    #[test]
    fn removal_uses_remembered_tile_not_current() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(1.0);
        let mut b = RadiationBlocker::new(1.0);
        idx.add_blocker(&mut a, at(0, 0, 0));
        idx.add_blocker(&mut b, at(0, 5, 5));
        // `a` has since moved to (5, 5); removal must still hit (0, 0).
        idx.remove_blocker(&mut a);
        assert_eq!(idx.resistance_at(at(0, 0, 0).unwrap()), 0.0);
        assert_eq!(idx.resistance_at(at(0, 5, 5).unwrap()), 1.0);
    }

    #[test]
    fn reanchor_moves_contribution() {
        let mut idx = ResistanceIndex::new();
        let mut a = RadiationBlocker::new(3.0);
        idx.add_blocker(&mut a, at(0, 2, 2));
        idx.reanchor_blocker(&mut a, at(1, 2, 2));
        assert_eq!(idx.resistance_at(at(0, 2, 2).unwrap()), 0.0);
        assert_eq!(idx.resistance_at(at(1, 2, 2).unwrap()), 3.0);
        assert_eq!(a.counted_at, at(1, 2, 2));
    }

    #[test]
    fn drop_structure_uncounts_its_blockers_only() {
        let mut idx = ResistanceIndex::new();
        let mut on0 = RadiationBlocker::new(1.0);
        let mut on1 = RadiationBlocker::new(1.0);
        idx.add_blocker(&mut on0, at(0, 0, 0));
        idx.add_blocker(&mut on1, at(1, 0, 0));

        let n = idx.drop_structure(StructureId(0), [&mut on0, &mut on1]);
        assert_eq!(n, 1);
        assert!(on0.counted_at.is_none());
        assert_eq!(on1.counted_at, at(1, 0, 0));
        assert!(idx.structure_map(StructureId(0)).is_none());

        // A later removal of the forgotten blocker must not touch anything.
        assert!(!idx.remove_blocker(&mut on0));
        assert!(idx.matches([&on0, &on1]));
    }

    #[test]
    fn fractional_attenuation_restores_exactly() {
        let mut idx = ResistanceIndex::new();
        let mut blockers: Vec<RadiationBlocker> =
            [0.1, 0.2, 0.3, 0.7].iter().map(|&a| RadiationBlocker::new(a)).collect();
        for b in &mut blockers {
            idx.add_blocker(b, at(0, 0, 0));
        }
        for b in blockers.iter_mut().rev() {
            idx.remove_blocker(b);
        }
        assert_eq!(idx.tile_count(), 0);
    }
}

#[cfg(test)]
mod conservation {
    use proptest::prelude::*;

    use rad_core::StructureId;
    use rad_entity::RadiationBlocker;

    use super::helpers::at;
    use crate::ResistanceIndex;

    #[derive(Debug, Clone)]
    enum Op {
        Add { blocker: usize, s: u32, x: i32, y: i32 },
        Remove { blocker: usize },
        Reanchor { blocker: usize, s: u32, x: i32, y: i32 },
        Toggle { blocker: usize },
        DestroyStructure { s: u32 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..6, 0u32..3, 0i32..3, 0i32..3)
                .prop_map(|(blocker, s, x, y)| Op::Add { blocker, s, x, y }),
            (0usize..6).prop_map(|blocker| Op::Remove { blocker }),
            (0usize..6, 0u32..3, 0i32..3, 0i32..3)
                .prop_map(|(blocker, s, x, y)| Op::Reanchor { blocker, s, x, y }),
            (0usize..6).prop_map(|blocker| Op::Toggle { blocker }),
            (0u32..3).prop_map(|s| Op::DestroyStructure { s }),
        ]
    }

    proptest! {
        #[test]
        fn resistance_equals_sum_of_counted_blockers(
            attenuations in prop::collection::vec(0.05f32..5.0, 6),
            ops in prop::collection::vec(op(), 1..60),
        ) {
            let mut idx = ResistanceIndex::new();
            let mut blockers: Vec<RadiationBlocker> =
                attenuations.iter().map(|&a| RadiationBlocker::new(a)).collect();

            for op in ops {
                match op {
                    Op::Add { blocker, s, x, y } => {
                        idx.add_blocker(&mut blockers[blocker], at(s, x, y));
                    }
                    Op::Remove { blocker } => {
                        idx.remove_blocker(&mut blockers[blocker]);
                    }
                    Op::Reanchor { blocker, s, x, y } => {
                        idx.reanchor_blocker(&mut blockers[blocker], at(s, x, y));
                    }
                    Op::Toggle { blocker } => {
                        // Disabling un-counts; enabling does not re-count until
                        // the next add, matching the host's event order.
                        let b = &mut blockers[blocker];
                        b.enabled = !b.enabled;
                        if !b.enabled {
                            idx.remove_blocker(b);
                        }
                    }
                    Op::DestroyStructure { s } => {
                        idx.drop_structure(StructureId(s), blockers.iter_mut());
                    }
                }

                prop_assert!(idx.matches(blockers.iter()));
                for b in &blockers {
                    if b.counted_at.is_some() {
                        prop_assert!(b.should_count(), "counted blocker must be active");
                    }
                }
            }
        }

        #[test]
        fn add_order_does_not_matter(
            attenuations in prop::collection::vec(0.001f32..10.0, 1..12),
        ) {
            let mut forward = ResistanceIndex::new();
            let mut backward = ResistanceIndex::new();
            let mut a: Vec<RadiationBlocker> =
                attenuations.iter().map(|&v| RadiationBlocker::new(v)).collect();
            let mut b = a.clone();
            for blocker in a.iter_mut() {
                forward.add_blocker(blocker, at(0, 0, 0));
            }
            for blocker in b.iter_mut().rev() {
                backward.add_blocker(blocker, at(0, 0, 0));
            }
            let tile = at(0, 0, 0).unwrap();
            prop_assert_eq!(forward.resistance_milli(tile), backward.resistance_milli(tile));
        }
    }
}
