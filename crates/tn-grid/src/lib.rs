//! `tn-grid`: uniform navigation grid, its builder, and grid routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`cell`]    | `NavCell`, `NavPath`, `ObstacleDef`, `ObstacleKind`         |
//! | [`grid`]    | `NavGrid`: cell store with adjacency and spatial queries   |
//! | [`builder`] | `GridBuilder`: annular ground + tower interior + stairs    |
//! | [`router`]  | `GridRouter` trait, `DijkstraRouter`                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod builder;
pub mod cell;
pub mod grid;
pub mod router;


pub use builder::GridBuilder;
pub use cell::{NavCell, NavPath, ObstacleDef, ObstacleKind};
pub use grid::NavGrid;
pub use router::{DijkstraRouter, GridRouter};
