//! tower: smallest end-to-end demo for the terranav framework.
//!
//! Three workers share a level with a three-floor tower and a building site:
//! one climbs the tower through its entrance, one walks over to the site and
//! up its scaffolding, and one crosses the ground ring around the tower.
//! Halfway through, construction finishes and the scaffolding is torn down.
//!
//! Pass a JSON `WorldConfig` path as the first argument to override the
//! defaults; set `TN_LOG=debug` to see the library's log output.

mod logger;

use std::time::Instant;

use anyhow::{Context, Result};

use tn_core::{AgentId, GridPos, StructureId, Tick, Vec3, WorldConfig};
use tn_elevated::Footprint;
use tn_grid::{DijkstraRouter, ObstacleDef, ObstacleKind};
use tn_world::{NavWorldBuilder, StructureChange, WorldObserver};

// ── Constants ─────────────────────────────────────────────────────────────────

const DT:              f32  = 0.1;
const MAX_STEPS:       u64  = 600;
const TEARDOWN_STEP:   u64  = 200;
const SITE:            StructureId = StructureId(1);

const CLIMBER:  AgentId = AgentId(0);
const BUILDER:  AgentId = AgentId(1);
const WALKER:   AgentId = AgentId(2);

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct DemoObserver {
    arrivals: Vec<(Tick, AgentId)>,
    steps:    u64,
}

impl WorldObserver for DemoObserver {
    fn on_structure_changed(&mut self, tick: Tick, structure: StructureId, change: &StructureChange) {
        match change {
            StructureChange::Raised { surfaces } => {
                println!("{tick}: {structure} scaffolding up ({surfaces} platforms)");
            }
            StructureChange::Removed { surfaces, stranded } => {
                println!(
                    "{tick}: {structure} scaffolding down ({surfaces} platforms, {} agents stranded)",
                    stranded.len()
                );
            }
        }
    }

    fn on_arrival(&mut self, tick: Tick, agent: AgentId, pos: Vec3) {
        println!("{tick}: {agent} arrived at {pos}");
        self.arrivals.push((tick, agent));
    }

    fn on_tick_end(&mut self, _tick: Tick, _moving: usize) {
        self.steps += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    logger::init()?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str::<WorldConfig>(&text).with_context(|| format!("parsing {path}"))?
        }
        None => WorldConfig::default(),
    };

    println!("=== tower: terranav demo ===");
    println!(
        "Floors: {}  |  Seed: {}  |  Speed: {}",
        config.tower.floors, config.seed, config.default_speed
    );
    println!();

    // 1. World: a tree on the walker's route, three agents.
    let t0 = Instant::now();
    let mut world = NavWorldBuilder::new(config, DijkstraRouter)
        .obstacle(ObstacleDef::new(0.0, 10.0, 1.5, ObstacleKind::Tree))
        .agent(Vec3::new(0.0, 0.0, -4.0))
        .agent(Vec3::new(-13.0, 0.0, 11.0))
        .agent(Vec3::new(12.0, 0.0, 0.0))
        .build()?;
    println!(
        "Grid: {} cells ({} walkable) on {} floors  [{:.1?}]",
        world.grid.cell_count(),
        world.grid.walkable_count(),
        world.grid.floors().count(),
        t0.elapsed()
    );

    // 2. Building site with two scaffold levels.
    world.begin_construction(SITE, Footprint::new(-8.0, 8.0, 4.0, 4.0), 0.0)?;

    // 3. Errands.
    world.request_grid_path(CLIMBER, GridPos::new(0, 0, world.config.tower.floors))?;
    let spot = world.request_scaffold_path(BUILDER, SITE)?;
    println!("{BUILDER} heading for {} on {:?}", spot.pos(), spot.surface_id());
    world.request_grid_path(WALKER, GridPos::new(-12, 0, 0))?;
    println!();

    // 4. Run.
    let mut observer = DemoObserver::default();
    for step in 0..MAX_STEPS {
        if step == TEARDOWN_STEP {
            world.end_construction(SITE)?;
        }
        world.step(DT, &mut observer);
        if observer.arrivals.len() == 3 && !world.is_under_construction(SITE) {
            break;
        }
    }

    // 5. Summary.
    println!();
    println!("=== Done: {} steps, {:.1} s simulated ===", observer.steps, world.clock.elapsed);
    for agent in [CLIMBER, BUILDER, WALKER] {
        let pos = world.agent_position(agent).unwrap_or(Vec3::ZERO);
        let arrived = observer.arrivals.iter().find(|(_, a)| *a == agent).map(|(t, _)| *t);
        match arrived {
            Some(t) => println!("  {agent}: at {pos}, arrived {t}"),
            None => println!("  {agent}: at {pos}, still moving"),
        }
    }
    if let Ok(json) = serde_json::to_string_pretty(&world.config) {
        log::debug!("effective config:\n{json}");
    }
    Ok(())
}
