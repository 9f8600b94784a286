//! `tn-core`: foundational types for the `terranav` navigation framework.
//!
//! This crate is a dependency of every other `tn-*` crate.  It has no `tn-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `StructureId`, `SurfaceId`, `ConnectionId`     |
//! | [`geo`]         | `Vec3` world points, `GridPos` cell coordinates           |
//! | [`config`]      | `NavGridConfig`, `TowerNavConfig`, `ElevatedPathConfig`, … |
//! | [`rng`]         | `NavRng` (seeded, deterministic)                          |
//! | [`time`]        | `Tick`, `SimClock`                                        |
//! | [`error`]       | `NavError`, `NavResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    ElevatedPathConfig, EntranceDef, NavGridConfig, ScaffoldConfig, StairDef, StairDirection,
    TowerNavConfig, WorldConfig,
};
pub use error::{NavError, NavResult};
pub use geo::{GridPos, Vec3};
pub use ids::{AgentId, ConnectionId, StructureId, SurfaceId};
pub use rng::NavRng;
pub use time::{SimClock, Tick};
