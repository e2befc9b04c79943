//! station — runnable demo for the rad_engine simulation.
//!
//! A reactor leaks inside a small station split by a bulkhead.  Crew members
//! are scattered through the rooms, one works EVA in open space, and one is
//! aboard a derelict drifting nearby.  After a few ticks the bulkhead door is
//! sealed, then the station's east wing is torn off as a separate structure.

use std::collections::BTreeMap;

use anyhow::Result;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rad_core::{EntityId, RadiationConfig, StructureId, Tick, Tile, WorldPos, classify};
use rad_entity::{RadiationBlocker, RadiationSource};
use rad_propagation::{GridcastPropagator, RadiationSnapshot, TickStats};
use rad_sim::{Irradiated, RadiationObserver, RadiationSimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:             u64   = 7;
const STATION_W:        i32   = 24;
const STATION_H:        i32   = 16;
const BULKHEAD_X:       i32   = 12;
const DOOR_Y:           i32   = 8;
const REACTOR_STRENGTH: f32   = 25.0;
const CREW:             usize = 6;
const CRATES:           usize = 14;

const STATION:   StructureId = StructureId(0);
const DERELICT:  StructureId = StructureId(1);
const EAST_WING: StructureId = StructureId(2);

fn center(x: i32, y: i32) -> WorldPos {
    WorldPos::new(x as f32 + 0.5, y as f32 + 0.5)
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Prints one line per tick and one per exposed crew member, and keeps a
/// running dose total per receiver.
#[derive(Default)]
struct ExposureReport {
    names: BTreeMap<EntityId, String>,
    doses: BTreeMap<EntityId, f32>,
}

impl RadiationObserver for ExposureReport {
    fn on_map_updated(&mut self, tick: Tick, snapshot: &RadiationSnapshot) {
        println!(
            "{tick}: {} irradiated tiles on {} structures, peak {:.1} rad/s, {} rays",
            snapshot.map.tile_count(),
            snapshot.map.structures().len(),
            snapshot.map.peak(),
            snapshot.rays.len(),
        );
    }

    fn on_irradiated(&mut self, _tick: Tick, event: &Irradiated) {
        let level = classify(event.rads_per_second);
        let rgb = level.color();
        let name = self.names.get(&event.receiver).map_or("?", String::as_str);
        let mark = if level.is_alert() { "!" } else { " " };
        println!(
            "  {mark} {name:<10} at {}  {:>5.2} rad/s  {:<8} #{:02x}{:02x}{:02x}",
            event.at, event.rads_per_second, level, rgb.0, rgb.1, rgb.2,
        );
        *self.doses.entry(event.receiver).or_default() += event.total_rads();
    }

    fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
        if stats.truncated > 0 {
            println!("    ({} searches hit the budget)", stats.truncated);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        println!();
        println!("Session ended at {final_tick}. Accumulated doses:");
        for (id, name) in &self.names {
            let total = self.doses.get(id).copied().unwrap_or(0.0);
            println!("    {name:<10} {total:>7.2} rad");
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== station — rad_engine demo ===");
    println!("Station {STATION_W}×{STATION_H}  |  Crew: {CREW}  |  Seed: {SEED}");
    println!();

    let mut rng = SmallRng::seed_from_u64(SEED);
    let mut report = ExposureReport::default();

    let mut sim = RadiationSimBuilder::new(RadiationConfig::default(), GridcastPropagator).build()?;

    // 1. Structures: the station and a small derelict to the east.
    sim.add_rect(STATION, WorldPos::new(0.0, 0.0), STATION_W, STATION_H)?;
    sim.add_rect(DERELICT, WorldPos::new(38.0, 4.0), 6, 6)?;

    // 2. Bulkhead down the middle with a single door.
    for y in (0..STATION_H).filter(|&y| y != DOOR_Y) {
        sim.spawn_blocker(center(BULKHEAD_X, y), RadiationBlocker::new(8.0))?;
    }

    // 3. Cargo scattered on the reactor side.
    for _ in 0..CRATES {
        let x = rng.gen_range(1..BULKHEAD_X);
        let y = rng.gen_range(0..STATION_H);
        let attenuation = rng.gen_range(0.5..2.5);
        sim.spawn_blocker(center(x, y), RadiationBlocker::new(attenuation))?;
    }

    // 4. The reactor.
    sim.spawn_source(center(3, DOOR_Y), RadiationSource::new(REACTOR_STRENGTH))?;

    // 5. Crew.
    for i in 0..CREW {
        let east = rng.gen_bool(0.5);
        let x = if east {
            rng.gen_range(BULKHEAD_X + 1..STATION_W)
        } else {
            rng.gen_range(0..BULKHEAD_X)
        };
        let y = rng.gen_range(0..STATION_H);
        let id = sim.spawn_receiver(center(x, y))?;
        report.names.insert(id, format!("crew-{i}"));
    }
    let eva = sim.spawn_receiver(WorldPos::new(30.0, 8.5))?;
    report.names.insert(eva, "eva".to_string());
    let salvager = sim.spawn_receiver(WorldPos::new(40.5, 8.5))?;
    report.names.insert(salvager, "salvager".to_string());

    println!(
        "{} entities, {} resisting tiles",
        sim.entities().len(),
        sim.resistance().tile_count(),
    );
    println!();

    // 6. Door open.
    sim.run_ticks(2, &mut report);

    // 7. Seal the door.
    println!();
    println!("-- bulkhead door sealed --");
    sim.spawn_blocker(center(BULKHEAD_X, DOOR_Y), RadiationBlocker::new(8.0))?;
    sim.run_ticks(2, &mut report);

    // 8. The east wing breaks away.
    println!();
    println!("-- east wing torn off --");
    let east_wing: Vec<Tile> = (BULKHEAD_X + 1..STATION_W)
        .flat_map(|x| (0..STATION_H).map(move |y| Tile::new(x, y)))
        .collect();
    let moved = sim.split_structure(STATION, EAST_WING, &east_wing)?;
    println!("{} tiles now form {EAST_WING}", moved.len());
    sim.run_ticks(2, &mut report);

    anyhow::ensure!(sim.resistance_consistent(), "resistance maps drifted from blockers");
    sim.end_session(&mut report);
    Ok(())
}
