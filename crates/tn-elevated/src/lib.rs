//! `tn-elevated`: transient elevated geometry and routing across it.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                          |
//! |----------------|-------------------------------------------------------------------|
//! | [`surface`]    | `Bounds`, `ElevatedSurface`, `ElevationConnection`, `ElevatedNavPoint`, `ElevatedPath` |
//! | [`registry`]   | `SurfaceRegistry`: owned index of surfaces and stairs            |
//! | [`scaffold`]   | `Footprint`, `ScaffoldLayout`, `build_scaffold`                   |
//! | [`pathfinder`] | `ElevatedPathfinder`: A* across ground, stairs, and platforms   |
//!
//! # Lifecycle
//!
//! Surfaces are owned by a parent structure.  When construction starts the
//! owner registers a [`ScaffoldLayout`]; when it ends,
//! [`SurfaceRegistry::unregister_by_parent`] removes the platforms and every
//! stair that touched them in one call.  Paths already handed out are not
//! revisited; re-planning is the caller's job.

pub mod pathfinder;
pub mod registry;
pub mod scaffold;
pub mod surface;

#[cfg(test)]
mod tests;

pub use pathfinder::ElevatedPathfinder;
pub use registry::SurfaceRegistry;
pub use scaffold::{build_scaffold, Footprint, ScaffoldLayout, Side};
pub use surface::{
    Bounds, ElevatedNavPoint, ElevatedPath, ElevatedSurface, ElevationConnection, StairEndpoint,
};
