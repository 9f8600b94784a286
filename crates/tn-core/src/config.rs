//! Navigation configuration.
//!
//! Every struct here has a `Default` that describes a small playable level
//! and a `validate()` that rejects inputs the builders cannot honour.  With
//! the `serde` feature the whole set can be loaded from a JSON/TOML file by
//! the application crate.

use crate::{GridPos, NavError, NavResult};

// ── NavGridConfig ─────────────────────────────────────────────────────────────

/// Shape of the ground grid (floor 0).
///
/// Cells exist for every integer `(x, z)` in the inclusive rectangle
/// `min_x..=max_x × min_z..=max_z`; they are walkable when their world
/// position lies in the annulus `inner_radius ..= outer_radius` around the
/// origin.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NavGridConfig {
    /// World units per cell.  Shared by ground and interior floors.
    pub cell_size: f32,
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
    /// Ground closer to the origin than this is not walkable (tower base).
    pub inner_radius: f32,
    /// Ground farther from the origin than this is not walkable (world edge).
    pub outer_radius: f32,
}

impl Default for NavGridConfig {
    fn default() -> Self {
        Self {
            cell_size:    1.0,
            min_x:        -20,
            max_x:        20,
            min_z:        -20,
            max_z:        20,
            inner_radius: 4.0,
            outer_radius: 20.0,
        }
    }
}

impl NavGridConfig {
    /// `true` if `(x, z)` lies inside the configured rectangle.
    #[inline]
    pub fn contains(&self, x: i32, z: i32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_z..=self.max_z).contains(&z)
    }

    pub fn validate(&self) -> NavResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(NavError::Config(format!("cell_size must be positive, got {}", self.cell_size)));
        }
        if self.min_x > self.max_x || self.min_z > self.max_z {
            return Err(NavError::Config("grid bounds are inverted".into()));
        }
        if self.inner_radius < 0.0 || self.outer_radius < self.inner_radius {
            return Err(NavError::Config(format!(
                "annulus radii must satisfy 0 <= inner <= outer, got {} / {}",
                self.inner_radius, self.outer_radius
            )));
        }
        Ok(())
    }
}

// ── Tower topology ────────────────────────────────────────────────────────────

/// Direction a staircase climbs.  The landing on the floor above is one cell
/// further along this direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StairDirection {
    /// +z
    North,
    /// -z
    South,
    /// +x
    East,
    /// -x
    West,
}

impl StairDirection {
    /// `(dx, dz)` of one step in this direction.
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            StairDirection::North => (0, 1),
            StairDirection::South => (0, -1),
            StairDirection::East  => (1, 0),
            StairDirection::West  => (-1, 0),
        }
    }
}

/// A staircase from `(x, z, floor)` up to the floor above.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StairDef {
    pub x: i32,
    pub z: i32,
    pub floor: i32,
    pub direction: StairDirection,
}

impl StairDef {
    #[inline]
    pub fn base(&self) -> GridPos {
        GridPos::new(self.x, self.z, self.floor)
    }

    /// The cell this stair arrives at on `floor + 1`.
    #[inline]
    pub fn landing(&self) -> GridPos {
        let (dx, dz) = self.direction.step();
        GridPos::new(self.x + dx, self.z + dz, self.floor + 1)
    }
}

/// The doorway linking a ground cell to a floor-1 interior cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntranceDef {
    /// Ground-side threshold `(x, z)` on floor 0.
    pub ground: (i32, i32),
    /// Interior-side cell `(x, z)` on floor 1.
    pub interior: (i32, i32),
}

/// Shape of the tower interior: `floors` stacked levels, each a centered
/// rectangle of `(2 * half_width + 1) × (2 * half_depth + 1)` cells.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TowerNavConfig {
    /// Number of interior floors (`1..=floors`).  `0` means no tower.
    pub floors: i32,
    pub half_width: i32,
    pub half_depth: i32,
    /// World height of one floor; floor `f` sits at `y = f * floor_height`.
    pub floor_height: f32,
    pub stairs: Vec<StairDef>,
    pub entrance: Option<EntranceDef>,
}

impl Default for TowerNavConfig {
    fn default() -> Self {
        Self {
            floors:       3,
            half_width:   3,
            half_depth:   3,
            floor_height: 3.0,
            // Opposite corners so a landing never doubles as the next base.
            stairs: vec![
                StairDef { x: -2, z: -2, floor: 1, direction: StairDirection::East },
                StairDef { x: 2,  z: 2,  floor: 2, direction: StairDirection::West },
            ],
            entrance: Some(EntranceDef { ground: (0, -4), interior: (0, -3) }),
        }
    }
}

impl TowerNavConfig {
    /// `true` if `(x, z)` lies in the interior rectangle.
    #[inline]
    pub fn in_interior(&self, x: i32, z: i32) -> bool {
        x.abs() <= self.half_width && z.abs() <= self.half_depth
    }

    /// `true` if `pos` is a cell of some interior floor.
    #[inline]
    pub fn contains(&self, pos: GridPos) -> bool {
        (1..=self.floors).contains(&pos.floor) && self.in_interior(pos.x, pos.z)
    }

    pub fn validate(&self) -> NavResult<()> {
        if self.floors < 0 || self.half_width < 0 || self.half_depth < 0 {
            return Err(NavError::Config("tower dimensions must be non-negative".into()));
        }
        if !(self.floor_height.is_finite() && self.floor_height > 0.0) {
            return Err(NavError::Config(format!(
                "floor_height must be positive, got {}",
                self.floor_height
            )));
        }

        // Every linked cell may carry at most one stair target.
        let mut linked: Vec<GridPos> = Vec::with_capacity(self.stairs.len() * 2 + 1);
        for stair in &self.stairs {
            let base = stair.base();
            if !self.contains(base) {
                return Err(NavError::Config(format!("stair base {base} is outside the tower")));
            }
            let landing = stair.landing();
            if !self.contains(landing) {
                return Err(NavError::StairOutsideInterior { landing });
            }
            linked.push(base);
            linked.push(landing);
        }
        if let Some(entrance) = self.entrance {
            let inside = GridPos::new(entrance.interior.0, entrance.interior.1, 1);
            if !self.contains(inside) {
                return Err(NavError::EntranceMissing(inside));
            }
            linked.push(inside);
        }

        linked.sort_unstable();
        if let Some(w) = linked.windows(2).find(|w| w[0] == w[1]) {
            return Err(NavError::StairConflict(w[0]));
        }
        Ok(())
    }
}

// ── Elevated navigation ───────────────────────────────────────────────────────

/// Tuning for the elevated (scaffold) pathfinder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevatedPathConfig {
    /// Step length on a surface, and the resolution of point identity.
    pub grid_size: f32,
    /// How far apart two surface rectangles may be and still count as
    /// touching for direct walking between them.
    pub adjacency_tolerance: f32,
}

impl Default for ElevatedPathConfig {
    fn default() -> Self {
        Self { grid_size: 0.5, adjacency_tolerance: 0.1 }
    }
}

impl ElevatedPathConfig {
    pub fn validate(&self) -> NavResult<()> {
        if !(self.grid_size.is_finite() && self.grid_size > 0.0) {
            return Err(NavError::Config(format!("grid_size must be positive, got {}", self.grid_size)));
        }
        if self.adjacency_tolerance < 0.0 {
            return Err(NavError::Config("adjacency_tolerance must be non-negative".into()));
        }
        Ok(())
    }
}

/// Dimensions of generated construction scaffolding.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaffoldConfig {
    /// Gap between the building footprint and the inner edge of a platform.
    pub clearance: f32,
    /// Width of each platform walkway.
    pub platform_depth: f32,
    pub stair_width: f32,
    /// Horizontal length of one flight of stairs.
    pub stair_run: f32,
    /// Platform heights above the terrain, lowest first.
    pub level_offsets: Vec<f32>,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            clearance:      0.3,
            platform_depth: 1.2,
            stair_width:    0.8,
            stair_run:      2.0,
            level_offsets:  vec![2.5, 5.0],
        }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> NavResult<()> {
        if self.platform_depth <= 0.0 || self.stair_width <= 0.0 || self.stair_run <= 0.0 {
            return Err(NavError::Config("scaffold dimensions must be positive".into()));
        }
        if self.clearance < 0.0 {
            return Err(NavError::Config("scaffold clearance must be non-negative".into()));
        }
        if self.level_offsets.windows(2).any(|w| w[1] <= w[0]) {
            return Err(NavError::Config("scaffold level offsets must be strictly ascending".into()));
        }
        Ok(())
    }
}

// ── WorldConfig ───────────────────────────────────────────────────────────────

/// Everything needed to stand up a navigation world.
///
/// Typically loaded from JSON by the application; any section left out of
/// the file takes its default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WorldConfig {
    pub grid:     NavGridConfig,
    pub tower:    TowerNavConfig,
    pub elevated: ElevatedPathConfig,
    pub scaffold: ScaffoldConfig,

    /// Master RNG seed.  The same seed always produces the same random picks.
    pub seed: u64,

    /// Walking speed given to newly spawned agents, in world units per second.
    pub default_speed: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid:          NavGridConfig::default(),
            tower:         TowerNavConfig::default(),
            elevated:      ElevatedPathConfig::default(),
            scaffold:      ScaffoldConfig::default(),
            seed:          42,
            default_speed: 3.0,
        }
    }
}

impl WorldConfig {
    /// Validate every section.
    pub fn validate(&self) -> NavResult<()> {
        self.grid.validate()?;
        self.tower.validate()?;
        self.elevated.validate()?;
        self.scaffold.validate()?;
        if !(self.default_speed.is_finite() && self.default_speed >= 0.0) {
            return Err(NavError::Config(format!(
                "default_speed must be finite and non-negative, got {}",
                self.default_speed
            )));
        }
        Ok(())
    }
}
