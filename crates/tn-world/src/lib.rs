//! `tn-world`: a navigation world that owns the grid, the scaffolding
//! registry, and every agent's motion.
//!
//! # Step loop
//!
//! ```text
//! for each step(dt):
//!   ① on_tick_start
//!   ② Structures: report scaffolding raised/removed since the last step
//!   ③ Motion: advance every following agent by speed * dt
//!              and report those that arrived (ascending AgentId)
//!   ④ on_tick_end, clock.advance(dt)
//! ```
//!
//! # Structure lifecycle
//!
//! `begin_construction` generates standard scaffolding around a footprint
//! and registers it; `end_construction` removes it together with every stair
//! that touched it.  Agents already walking a path across removed platforms
//! are reported, never re-planned.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use tn_core::{StructureId, Vec3, WorldConfig};
//! use tn_elevated::Footprint;
//! use tn_grid::DijkstraRouter;
//! use tn_world::{NavWorldBuilder, NoopObserver};
//!
//! let mut world = NavWorldBuilder::new(WorldConfig::default(), DijkstraRouter)
//!     .agent(Vec3::new(-6.0, 0.0, 12.0))
//!     .build()?;
//! world.begin_construction(StructureId(1), Footprint::new(-6.0, 6.0, 4.0, 4.0), 0.0)?;
//! world.request_scaffold_path(tn_core::AgentId(0), StructureId(1))?;
//! world.run_steps(100, 0.1, &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;


pub use builder::NavWorldBuilder;
pub use error::{WorldError, WorldResult};
pub use observer::{NoopObserver, StructureChange, WorldObserver};
pub use world::NavWorld;
