//! Budgeted least-resistance flood fill over one structure.
//!
//! # Cost units
//!
//! Costs are milli-rads (u32), the same fixed-point unit as the resistance
//! maps, so path sums are exact and independent of expansion order.  A step
//! onto a neighbouring tile costs `1000 + resistance(neighbour)`; the source's
//! own tile is free.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use log::debug;

use rad_core::{FastMap, Tile, TilePos, from_milli};

use crate::{PropagationContext, RadiationMap};

/// Cost of one tile step before resistance, in milli-rads.
const STEP_MILLI: u32 = 1_000;

/// Bookkeeping for one flood fill.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodStats {
    /// Tiles settled and recorded.
    pub tiles_visited: usize,
    /// Neighbour relaxations performed.
    pub work:          usize,
    /// `true` if a budget stopped the search with tiles still queued.
    pub truncated:     bool,
}

/// Flood `reach_milli` outward from `origin` over its structure's tiles and
/// add every tile's remaining value to `out`.
///
/// Each tile gets the value of its cheapest path.  Tiles whose value would
/// fall below the configured floor are not recorded and are not expanded
/// through.  The search stops early once it has settled
/// `max_flood_tiles` tiles or performed `max_flood_work` relaxations; the
/// tiles settled so far are kept.
pub fn flood_fill(
    ctx:         &PropagationContext<'_>,
    origin:      TilePos,
    reach_milli: u32,
    out:         &mut RadiationMap,
) -> FloodStats {
    let mut stats = FloodStats::default();
    let floor = ctx.floor_milli();
    if reach_milli < floor {
        return stats;
    }
    let Some(structure) = ctx.layout.structure(origin.structure) else { return stats };
    if !structure.has_tile(origin.tile) {
        return stats;
    }

    let max_tiles = ctx.config.max_flood_tiles;
    let max_work  = ctx.config.max_flood_work;

    // dist[t] = best known cost (milli) to reach t.
    let mut dist: FastMap<Tile, u32> = FastMap::default();
    dist.insert(origin.tile, 0);

    // Min-heap on (cost, tile); the tile is the deterministic tie-breaker.
    let mut heap: BinaryHeap<Reverse<(u32, Tile)>> = BinaryHeap::new();
    heap.push(Reverse((0, origin.tile)));

    'search: while let Some(Reverse((cost, tile))) = heap.pop() {
        // Skip stale heap entries.
        if dist.get(&tile).is_some_and(|&best| cost > best) {
            continue;
        }
        if stats.tiles_visited >= max_tiles {
            stats.truncated = true;
            break;
        }

        stats.tiles_visited += 1;
        out.add(TilePos::new(origin.structure, tile), from_milli(reach_milli - cost));

        for next in tile.neighbors4() {
            if stats.work >= max_work {
                stats.truncated = true;
                break 'search;
            }
            stats.work += 1;

            if !structure.has_tile(next) {
                continue;
            }
            let at = TilePos::new(origin.structure, next);
            let new_cost = cost
                .saturating_add(STEP_MILLI)
                .saturating_add(ctx.resistance.resistance_milli(at));

            // Frontier: too weak to record, so not worth expanding either.
            if new_cost > reach_milli || reach_milli - new_cost < floor {
                continue;
            }
            if dist.get(&next).is_none_or(|&best| new_cost < best) {
                dist.insert(next, new_cost);
                heap.push(Reverse((new_cost, next)));
            }
        }
    }

    if stats.truncated {
        debug!(
            "flood from {origin} truncated after {} tiles / {} relaxations",
            stats.tiles_visited, stats.work,
        );
    }
    stats
}
