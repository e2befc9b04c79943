//! Unit tests for rad-grid.
//!
//! All tests use hand-built rectangular layouts.

#[cfg(test)]
mod structure {
    use rad_core::{StructureId, Tile, WorldPos};
    use crate::{Structure, TileBounds};

    #[test]
    fn bounds_track_edge_removal() {
        let mut s = Structure::new(StructureId(0), WorldPos::new(0.0, 0.0));
        assert!(s.bounds().is_none());
        s.add_tile(Tile::new(0, 0));
        s.add_tile(Tile::new(4, 2));
        s.add_tile(Tile::new(1, 1));
        assert_eq!(
            s.bounds(),
            Some(TileBounds { min: Tile::new(0, 0), max: Tile::new(4, 2) })
        );
        assert!(s.remove_tile(Tile::new(4, 2)));
        assert_eq!(
            s.bounds(),
            Some(TileBounds { min: Tile::new(0, 0), max: Tile::new(1, 1) })
        );
        assert!(!s.remove_tile(Tile::new(4, 2)));
    }

    #[test]
    fn world_tile_conversion() {
        let s = Structure::new(StructureId(0), WorldPos::new(10.0, -5.0));
        assert_eq!(s.tile_at(WorldPos::new(10.0, -5.0)), Tile::new(0, 0));
        assert_eq!(s.tile_at(WorldPos::new(12.7, -4.1)), Tile::new(2, 0));
        assert_eq!(s.tile_at(WorldPos::new(9.9, -5.5)), Tile::new(-1, -1));
        assert_eq!(s.tile_center(Tile::new(2, 0)), WorldPos::new(12.5, -4.5));
    }
}

#[cfg(test)]
mod layout {
    use rad_core::{StructureId, Tile, TilePos, WorldPos};
    use crate::{GridError, StructureLayout};

    fn two_rooms() -> StructureLayout {
        let mut layout = StructureLayout::new();
        layout.add_rect(StructureId(1), WorldPos::new(0.0, 0.0), 5, 5).unwrap();
        layout.add_rect(StructureId(2), WorldPos::new(20.0, 0.0), 5, 5).unwrap();
        layout
    }

    #[test]
    fn resolve_on_and_off_structure() {
        let layout = two_rooms();
        assert_eq!(
            layout.resolve(WorldPos::new(2.5, 3.5)),
            Some(TilePos::new(StructureId(1), Tile::new(2, 3)))
        );
        assert_eq!(
            layout.resolve(WorldPos::new(21.5, 0.5)),
            Some(TilePos::new(StructureId(2), Tile::new(1, 0)))
        );
        assert_eq!(layout.resolve(WorldPos::new(12.0, 2.0)), None);
        assert_eq!(layout.resolve(WorldPos::new(f32::NAN, 2.0)), None);
    }

    #[test]
    fn resolve_skips_holes_inside_bounds() {
        let mut layout = two_rooms();
        layout.clear_tile(StructureId(1), Tile::new(2, 2)).unwrap();
        assert_eq!(layout.resolve(WorldPos::new(2.5, 2.5)), None);
        assert!(!layout.has_tile(TilePos::new(StructureId(1), Tile::new(2, 2))));
    }

    #[test]
    fn duplicate_structure_rejected() {
        let mut layout = two_rooms();
        let err = layout.add_structure(StructureId(1), WorldPos::default()).unwrap_err();
        assert!(matches!(err, GridError::DuplicateStructure(StructureId(1))));
    }

    #[test]
    fn removed_structure_no_longer_resolves() {
        let mut layout = two_rooms();
        layout.remove_structure(StructureId(1)).unwrap();
        assert_eq!(layout.resolve(WorldPos::new(2.5, 2.5)), None);
        assert!(layout.remove_structure(StructureId(1)).is_err());
    }

    #[test]
    fn growing_a_structure_updates_index() {
        let mut layout = two_rooms();
        layout.set_tile(StructureId(1), Tile::new(8, 0)).unwrap();
        assert_eq!(
            layout.resolve(WorldPos::new(8.5, 0.5)),
            Some(TilePos::new(StructureId(1), Tile::new(8, 0)))
        );
    }

    #[test]
    fn split_moves_tiles_and_keeps_world_positions() {
        let mut layout = two_rooms();
        let tiles = [Tile::new(3, 0), Tile::new(4, 0), Tile::new(9, 9)];
        let moved = layout.split_structure(StructureId(1), StructureId(3), &tiles).unwrap();
        assert_eq!(moved, vec![Tile::new(3, 0), Tile::new(4, 0)]);
        assert_eq!(
            layout.resolve(WorldPos::new(4.5, 0.5)),
            Some(TilePos::new(StructureId(3), Tile::new(4, 0)))
        );
        assert_eq!(
            layout.resolve(WorldPos::new(1.5, 0.5)),
            Some(TilePos::new(StructureId(1), Tile::new(1, 0)))
        );
    }

    #[test]
    fn merge_translates_tiles() {
        let mut layout = StructureLayout::new();
        layout.add_rect(StructureId(1), WorldPos::new(0.0, 0.0), 2, 1).unwrap();
        layout.add_rect(StructureId(2), WorldPos::new(2.0, 0.0), 2, 1).unwrap();
        let pairs = layout.merge_structure(StructureId(2), StructureId(1)).unwrap();
        assert_eq!(pairs.len(), 2);
        assert!(layout.structure(StructureId(2)).is_none());
        assert_eq!(
            layout.resolve(WorldPos::new(3.5, 0.5)),
            Some(TilePos::new(StructureId(1), Tile::new(3, 0)))
        );
    }

    #[test]
    fn merge_rejects_misaligned_origins() {
        let mut layout = StructureLayout::new();
        layout.add_rect(StructureId(1), WorldPos::new(0.0, 0.0), 2, 1).unwrap();
        layout.add_rect(StructureId(2), WorldPos::new(2.5, 0.0), 2, 1).unwrap();
        let err = layout.merge_structure(StructureId(2), StructureId(1)).unwrap_err();
        assert!(matches!(err, GridError::Misaligned { .. }));
    }

    #[test]
    fn merge_into_itself_keeps_the_structure() {
        let mut layout = StructureLayout::new();
        layout.add_rect(StructureId(1), WorldPos::new(0.0, 0.0), 2, 1).unwrap();
        let err = layout.merge_structure(StructureId(1), StructureId(1)).unwrap_err();
        assert!(matches!(err, GridError::SelfMerge(StructureId(1))));
        assert_eq!(layout.structure(StructureId(1)).map(|s| s.tile_count()), Some(2));
        assert!(layout.resolve(WorldPos::new(0.5, 0.5)).is_some());
    }

    #[test]
    fn tiles_crossed_spans_structures() {
        let layout = two_rooms();
        // Horizontal line along row 2 from the middle of room 1 to the middle
        // of room 2.
        let crossed = layout.tiles_crossed(WorldPos::new(2.5, 2.5), WorldPos::new(22.5, 2.5));
        let room1: Vec<_> = crossed.iter().filter(|p| p.structure == StructureId(1)).collect();
        let room2: Vec<_> = crossed.iter().filter(|p| p.structure == StructureId(2)).collect();
        assert_eq!(room1.len(), 3, "x = 2, 3, 4 in room 1: {crossed:?}");
        assert_eq!(room2.len(), 3, "x = 0, 1, 2 in room 2: {crossed:?}");
        assert!(crossed.iter().all(|p| p.tile.y == 2));
    }

    #[test]
    fn tiles_crossed_misses_distant_structures() {
        let layout = two_rooms();
        let crossed = layout.tiles_crossed(WorldPos::new(0.5, 10.0), WorldPos::new(24.0, 10.0));
        assert!(crossed.is_empty());
    }
}

#[cfg(test)]
mod raycast {
    use rad_core::Tile;
    use crate::raycast::{clip_segment, traverse};

    #[test]
    fn traverse_single_tile() {
        assert_eq!(traverse([0.2, 0.2], [0.8, 0.9]), vec![Tile::new(0, 0)]);
    }

    #[test]
    fn traverse_diagonal_is_connected() {
        let tiles = traverse([0.5, 0.5], [4.5, 2.5]);
        assert_eq!(tiles.first(), Some(&Tile::new(0, 0)));
        assert_eq!(tiles.last(), Some(&Tile::new(4, 2)));
        assert_eq!(tiles.len(), 7);
        for w in tiles.windows(2) {
            assert_eq!(w[0].manhattan(w[1]), 1, "gap between {} and {}", w[0], w[1]);
        }
    }

    #[test]
    fn traverse_negative_direction() {
        let tiles = traverse([3.5, 0.5], [-1.5, 0.5]);
        let xs: Vec<i32> = tiles.iter().map(|t| t.x).collect();
        assert_eq!(xs, vec![3, 2, 1, 0, -1, -2]);
    }

    #[test]
    fn clip_inside_and_outside() {
        let (a, b) = clip_segment([-5.0, 1.0], [5.0, 1.0], [0.0, 0.0], [2.0, 2.0]).unwrap();
        assert!(a[0].abs() < 1e-5 && (a[1] - 1.0).abs() < 1e-5, "{a:?}");
        assert!((b[0] - 2.0).abs() < 1e-5 && (b[1] - 1.0).abs() < 1e-5, "{b:?}");
        assert!(clip_segment([-5.0, 3.0], [5.0, 3.0], [0.0, 0.0], [2.0, 2.0]).is_none());
        assert!(clip_segment([-5.0, -5.0], [-1.0, -1.0], [0.0, 0.0], [2.0, 2.0]).is_none());
    }
}
